mod cloud_services;

pub use cloud_services::{
    CloudServices, CloudServicesError, CloudServicesHandle, ResolvedServices, ServiceMode,
};
