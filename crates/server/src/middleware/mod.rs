mod ready;

pub use ready::Ready;
