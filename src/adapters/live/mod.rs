//! Live adapters for real external interactions.

pub mod clock;
pub mod github;
pub mod probe;

pub use clock::LiveClock;
pub use github::GitHubClient;
pub use probe::HttpProbe;
