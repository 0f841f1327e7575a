pub mod cloudflare;
pub mod desec;
pub mod models;

pub use cloudflare::CloudflareClient;
pub use desec::DesecClient;
