pub mod element_errors;
pub mod keplerian;
pub mod usm;

pub use element_errors::ElementErrors;
pub use keplerian::KeplerianElements;
pub use usm::{
    keplerian_to_usm7, keplerian_to_usmem, usm7_to_keplerian, usmem_to_keplerian, Usm7Elements,
    UsmemElements,
};
