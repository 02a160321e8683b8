pub mod banner;
pub mod stat_card;
pub mod nav;
pub mod toast;
