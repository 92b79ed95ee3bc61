#[allow(clippy::all)]
pub mod iosxr_ems {
    include!("IOSXRExtensibleManagabilityService.rs");
}
