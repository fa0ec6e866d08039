pub mod insight;
pub mod latest;
pub mod rankings;
pub mod records;
pub mod series;
pub mod stations;
