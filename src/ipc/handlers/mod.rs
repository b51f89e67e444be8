pub mod core;
pub mod days;
pub mod months;
pub mod quarters;
pub mod shifts;
pub mod weeks;
