// Domain layer - Navigation value types and filter algebra
pub mod attribute;
pub mod data_point;
pub mod dimension;
pub mod drilldown;
pub mod filter;
pub mod jtd;
