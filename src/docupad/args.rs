use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docupad")]
#[command(about = "Document management with collaborative pad editing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage directory (defaults to the user data dir)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents
    #[command(alias = "ls")]
    List {
        /// Only documents in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a new document
    #[command(alias = "add")]
    Create {
        /// File name, extension included (e.g. notes.html)
        name: String,

        /// Category to file the document under
        #[arg(short, long)]
        category: String,

        /// Free-form description
        #[arg(short = 'm', long, default_value = "")]
        description: String,

        /// Read initial content from this file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show one or more documents
    #[command(alias = "info")]
    Show {
        /// Listing indexes or document names
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Modify a document
    Update {
        /// Listing index or document name
        selector: String,

        /// New file name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,

        /// Move to this category
        #[arg(short, long)]
        category: Option<String>,

        /// Replace content with this file's bytes
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete one or more documents
    #[command(alias = "rm")]
    Delete {
        /// Listing indexes or document names
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Search documents by name, description, or category
    Search { term: String },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Share a document and print its download link
    Share { selector: String },

    /// Revoke a document's shared link
    Unshare { selector: String },

    /// Download a document's content to a file
    Download {
        /// Listing index or document name
        selector: Option<String>,

        /// Shared-link token instead of a selector
        #[arg(long)]
        shared: Option<String>,

        /// File name the shared link was issued for
        #[arg(long)]
        filename: Option<String>,

        /// Output path (defaults to the document name)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Archive documents into a .tar.gz
    Export {
        /// Listing indexes or document names (all documents if omitted)
        selectors: Vec<String>,

        /// Directory to write the archive into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Collaborative editing sessions
    Edit {
        #[command(subcommand)]
        action: EditCommands,
    },

    /// Show which editors are available and for which extensions
    Editors,

    /// Print the content file path of one or more documents
    Path {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Add a category
    Add {
        name: String,

        #[arg(short = 'm', long, default_value = "")]
        description: String,

        /// Parent category name
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Modify a category
    Modify {
        name: String,

        #[arg(long)]
        new_name: Option<String>,

        #[arg(short = 'm', long)]
        description: Option<String>,

        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Delete a category, its subcategories, and their documents
    #[command(alias = "rm")]
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Open an editing session and print the embeddable view
    Open { selector: String },

    /// Pull the session's content back into the document
    Sync { selector: String },

    /// Close the session and delete the remote pad
    Close { selector: String },
}
