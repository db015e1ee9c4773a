mod route;
pub mod schema;

pub use self::route::notify;
