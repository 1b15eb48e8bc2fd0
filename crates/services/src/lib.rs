#![forbid(unsafe_code)]

pub mod app_services;
pub mod card_store;
pub mod error;
pub mod quiz;
pub mod study;
pub mod timer;

pub use flash_core::Clock;

pub use app_services::AppServices;
pub use card_store::CardStore;
pub use error::{AppServicesError, CardStoreError, QuizError, StudyError};
pub use quiz::{ProfileStats, QuizLoopService};
pub use study::StudyService;
pub use timer::{TICK_PERIOD, Ticker, spawn_ticker};
