//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{
    BackendConfig, ClubConfig, FeaturesConfig, KakaoConfig, LoggingConfig, SessionConfig, Settings,
};
