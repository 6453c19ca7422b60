//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod dashboard;
pub mod handlers;
pub mod material;
pub mod order;
pub mod status;
pub mod store;
pub mod user;

pub use args::{GlobalOptions, OutputFormat, PageArgs};
pub use context::CommandContext;

/// ClothOp CLI - command-line companion for the Clothes Manager service
#[derive(Parser, Debug)]
#[command(name = "clothop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "CLOTHOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "CLOTHOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the service URL
    #[arg(long, global = true, env = "CLOTHOP_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CLOTHOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store a session token
    Login {
        /// Account name (prompted when omitted)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "CLOTHOP_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show configuration and session status
    Status,

    /// Run first-time setup (initial admin and store)
    Setup(SetupArgs),

    /// Change the signed-in user's password
    ChangePassword {
        /// Current password (prompted when omitted)
        #[arg(long)]
        current: Option<String>,

        /// New password (prompted when omitted)
        #[arg(long = "new")]
        new_password: Option<String>,
    },

    /// Show summary counters
    Dashboard,

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Manage stores
    #[command(subcommand)]
    Store(StoreCommands),

    /// Manage materials and stock
    #[command(subcommand)]
    Material(MaterialCommands),

    /// List garment sizes
    #[command(subcommand)]
    Size(SizeCommands),

    /// Manage orders
    #[command(subcommand)]
    Order(OrderCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   clothop completion bash > /etc/bash_completion.d/clothop
  zsh:    clothop completion zsh > \"${fpath[1]}/_clothop\"
  fish:   clothop completion fish > ~/.config/fish/completions/clothop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// First-run setup arguments
#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// Initial super admin name
    #[arg(long)]
    pub username: Option<String>,

    /// Initial super admin password
    #[arg(long, env = "CLOTHOP_PASSWORD", hide_env = true)]
    pub password: Option<String>,

    /// Title of the first store
    #[arg(long)]
    pub store_title: Option<String>,

    /// Address of the first store
    #[arg(long)]
    pub store_address: Option<String>,
}

/// User management subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all users
    List,

    /// Show the signed-in user
    Me,

    /// Create a user
    Create {
        /// Account name
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Store the user belongs to
        #[arg(long)]
        store_id: i64,

        /// Role (SUPER_ADMIN, LOCAL_ADMIN)
        #[arg(long, default_value = "LOCAL_ADMIN")]
        role: String,

        /// Create the account disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Delete a user
    Delete {
        user_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Store management subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// List all stores
    List,

    /// Show one store
    Get { store_id: i64 },

    /// Create a store
    Create {
        title: String,

        #[arg(long, default_value = "")]
        address: String,

        /// Create the store inactive
        #[arg(long)]
        disabled: bool,
    },

    /// Edit a store; unspecified fields keep their current value
    Edit {
        store_id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Mark active (true) or inactive (false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a store
    Delete {
        store_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Material management subcommands
#[derive(Subcommand, Debug)]
pub enum MaterialCommands {
    /// List materials, one page at a time
    List {
        /// Only this store's materials
        #[arg(long)]
        store: Option<i64>,

        /// Filter by description
        #[arg(long)]
        text: Option<String>,

        /// Filter by size id
        #[arg(long)]
        size_id: Option<i64>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Add a material to a store
    Create {
        /// Garment description
        text: String,

        #[arg(long)]
        size_id: i64,

        #[arg(long)]
        quantity: i64,

        #[arg(long)]
        store_id: i64,
    },

    /// Edit a material; unspecified fields keep their current value
    Edit {
        material_id: i64,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        size_id: Option<i64>,

        #[arg(long)]
        quantity: Option<i64>,
    },

    /// Delete a material
    Delete {
        material_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Move stock to another store
    Distribute {
        material_id: i64,

        /// Receiving store id
        #[arg(long = "to")]
        receiver_store_id: i64,

        #[arg(long)]
        quantity: i64,
    },
}

/// Size subcommands
#[derive(Subcommand, Debug)]
pub enum SizeCommands {
    /// List all sizes
    List,
}

/// Order status accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderStatusArg {
    Pending,
    Completed,
    Cancelled,
}

/// Order fields shared by create and edit
#[derive(Args, Debug, Clone, Default)]
pub struct OrderFields {
    /// Material description
    #[arg(long)]
    pub material: Option<String>,

    /// Size name
    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub quantity: Option<i64>,

    /// Order date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<OrderStatusArg>,

    /// Units sold
    #[arg(long)]
    pub sold: Option<i64>,

    /// Store title
    #[arg(long)]
    pub store: Option<String>,

    /// User name
    #[arg(long)]
    pub user: Option<String>,
}

/// Order management subcommands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List orders visible to the signed-in user
    List {
        /// Filter by user id
        #[arg(long)]
        user_id: Option<i64>,

        /// Filter by store id (super admins only)
        #[arg(long)]
        store_id: Option<i64>,

        /// Filter by material description
        #[arg(long)]
        material: Option<String>,

        /// Filter by size name
        #[arg(long)]
        size: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Place an order
    Create(OrderFields),

    /// Edit an order; unspecified fields keep their current value
    Edit {
        order_id: i64,

        #[command(flatten)]
        fields: OrderFields,
    },

    /// Delete an order
    Delete {
        order_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Find orders whose material or size no longer exists
    Check,
}
