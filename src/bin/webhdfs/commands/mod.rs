pub mod cat;
pub mod cp;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod rm;
