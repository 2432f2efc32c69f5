//! Category CLI commands

use clap::Subcommand;

use super::load_snapshots;
use crate::api::ExpenseBackend;
use crate::dashboard::Dashboard;
use crate::display::format_category_list;
use crate::error::ExpenseResult;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category label
        label: String,
    },
}

/// Handle a category command
pub fn handle_category_command<B: ExpenseBackend>(
    dashboard: &mut Dashboard<B>,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    match cmd {
        CategoryCommands::List => {
            load_snapshots(dashboard)?;
            print!("{}", format_category_list(dashboard.categories()));
        }

        CategoryCommands::Add { label } => {
            match dashboard.add_category(&label)? {
                Some(category) => {
                    println!("Created category: {}", category.label);
                    println!("  ID: {}", category.id);
                }
                None => println!("Created category: {}", label.trim()),
            }
        }
    }

    Ok(())
}
