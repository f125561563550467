//! Row counting engine for collections of CSV files.
//!
//! This crate parses a grid of filter conditions into filter groups, evaluates
//! each group against every row of a set of input tables, and produces one
//! match count per table and group together with a log of rows that could not
//! be evaluated.
//!
//! # Example
//!
//! ```
//! use csvcount_core::analysis::{count_table, AnalysisOptions};
//! use csvcount_core::codec::parse_grid;
//! use csvcount_core::filter::FilterSetBuilder;
//! use csvcount_core::table::Table;
//!
//! let filters = FilterSetBuilder::build(&parse_grid(
//!     "Count,>=10\nType,\"Deletion,Insertion\"\n".as_bytes(),
//! )?)?;
//! let table = Table::from_grid(parse_grid(
//!     "Count,Type\n12,Deletion\n5,Insertion\n".as_bytes(),
//! )?);
//!
//! let (counts, errors) = count_table("001.csv", &table, &filters, &AnalysisOptions::default());
//! assert_eq!(counts, vec![1]);
//! assert!(errors.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod cell_ref;
pub mod codec;
pub mod discovery;
pub mod filter;
pub mod sample;
pub mod table;

pub use analysis::{AnalysisError, AnalysisOptions, AnalysisReport, ErrorEntry, ResultRow};
pub use table::{InputTable, Table};
