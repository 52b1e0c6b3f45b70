pub mod f32;
pub mod frame;
pub mod io;
pub mod u8;

pub use self::f32::VolumeF32;
pub use self::frame::ImageFrame;
pub use self::u8::VolumeU8;
