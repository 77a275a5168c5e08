pub mod chart;
pub mod style;
pub mod table;

pub use chart::{BalanceChart, ChartRow, Marker};
pub use style::{style, UiStyle};
pub use table::{Align, Table, TableColumn, TableRenderer};
