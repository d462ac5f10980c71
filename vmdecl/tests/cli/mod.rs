mod init;
mod resolve;
