pub mod earnings;
pub mod period;
pub mod rates;
pub mod result;
