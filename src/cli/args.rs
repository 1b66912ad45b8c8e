//! CLI argument definitions using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueHint};
use uuid::Uuid;

/// Inspect hierarchical BOM documents: structure, cost roll-up, compliance
#[derive(Parser, Debug)]
#[command(name = "bomtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the BOM structure with designators and rolled-up costs
    Tree {
        /// BOM document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Total cost of the document or of one subtree
    Cost {
        /// BOM document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Restrict to the subtree rooted at this node id
        #[arg(long)]
        id: Option<Uuid>,
    },

    /// Compliance status statistics over a tree or forest
    Status {
        /// Compliance document (JSON object or array of roots)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Evaluation date for expiry reclassification (default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Audit a BOM document for structural rule violations
    Check {
        /// BOM document (JSON object or array of roots)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
