pub mod checkout;
pub mod config;

pub mod hooks {
    pub mod donation_checkout;
}
pub mod components {
    pub mod donation;
}
pub mod pages {
    pub mod landing;
}
