mod helper;
mod subscription;
