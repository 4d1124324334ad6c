//! Touch sensor bridge drivers

pub mod descriptor;
pub mod report;
pub mod rmi_hid;

pub use descriptor::DeviceDescriptor;
pub use rmi_hid::RmiHidDevice;
