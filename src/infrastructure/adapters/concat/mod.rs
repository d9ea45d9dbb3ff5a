//! Concat Adapter - 音频拼接实现

mod stream_concatenator;

pub use stream_concatenator::StreamConcatenator;
