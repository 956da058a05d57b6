//! Static CSV corpora used across harnesses.
//!
//! One well-formed body per source plus a few degenerate shapes. Bodies use
//! the exact headers the dashboard expects.

use dashfeed::SourceKind;

pub const SALES_CSV: &str = "\
Date,Revenue_USD
2024-01-01,120.50
2024-01-02,99.00
";

pub const TRACKS_CSV: &str = "\
Track_ID,Purchase_Count
101,12
102,40
103,7
";

pub const CUSTOMERS_CSV: &str = "\
Age_Group,Total_Purchases
18-25,120
26-35,340
36-45,275
46-60,150
60+,60
";

pub const GENRES_CSV: &str = "\
Genre,Total_Minutes_Played
Rock,5400
Jazz,1800
Pop,4200
";

pub const INVENTORY_CSV: &str = "\
Product_Category,Current_Stock
Widgets,42
Vinyl,15
Headphones,8
";

/// Header plus rows where every cell is empty.
pub const ALL_NULL_SALES_CSV: &str = "\
Date,Revenue_USD
,
,
,
";

/// A header and nothing else.
pub const HEADER_ONLY_SALES_CSV: &str = "Date,Revenue_USD\n";

/// Good rows interleaved with degenerate ones.
pub const SPARSE_INVENTORY_CSV: &str = "\
Product_Category,Current_Stock
Widgets,42
,
Cables,
,
,7
";

/// The well-formed body for a source.
pub fn csv_for(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Sales => SALES_CSV,
        SourceKind::Tracks => TRACKS_CSV,
        SourceKind::Customers => CUSTOMERS_CSV,
        SourceKind::Genres => GENRES_CSV,
        SourceKind::Inventory => INVENTORY_CSV,
    }
}

/// Number of data rows in a fixture body.
pub fn data_rows(body: &str) -> usize {
    body.lines().skip(1).filter(|l| !l.is_empty()).count()
}
