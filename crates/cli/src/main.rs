//! ECycle CLI - shop management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Seed the default catalog and admin account
//! ecycle seed
//!
//! # Browse and manage the catalog
//! ecycle catalog list
//! ecycle catalog add -n "City Cruiser" -p 1299 -c Commuter
//!
//! # Shop
//! ecycle account signup -n Ada -e ada@example.com -p secret1
//! ecycle cart add 1
//! ecycle checkout -n Ada -a "1 Road" --phone 555-0100 --payment card
//! ecycle orders track <id>
//! ```
//!
//! # Environment Variables
//!
//! - `ECYCLE_DATA_FILE` - Path to the JSON data file
//!   (default: `ecycle-data.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ecycle")]
#[command(author, version, about = "ECycle shop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the default catalog and the admin account
    Seed,
    /// Browse and manage the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign up, log in, and out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Recipient name
        #[arg(short, long)]
        name: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Payment method
        #[arg(long)]
        payment: String,
    },
    /// View and track your orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Admin panel: all orders and contact messages
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Send a contact message
    Contact {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Your email address
        #[arg(short, long)]
        email: String,

        /// The message body
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered and sorted
    List {
        /// Search query (name or description substring)
        #[arg(short, long)]
        query: Option<String>,

        /// Category filter (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`price-asc`, `price-desc`, `popularity`)
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Add a product (admin)
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in whole dollars
        #[arg(short, long)]
        price: i64,

        /// Category
        #[arg(short, long)]
        category: String,

        /// Image path
        #[arg(short, long, default_value = "")]
        image: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a product (admin)
    Remove {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with its subtotal
    Show,
    /// Add one of a product by id
    Add { id: i64 },
    /// Increment a line's quantity
    Increase { id: i64 },
    /// Decrement a line's quantity (removes the line at zero)
    Decrease { id: i64 },
    /// Remove a line outright
    Remove { id: i64 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new account (logs you in)
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (minimum 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Log in with an email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in account
    Whoami,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders, newest first
    List,
    /// Show tracking progress and the delivery estimate for an order
    Track {
        /// Order id
        id: i64,
    },
    /// Cancel an order that has not been delivered
    Cancel {
        /// Order id
        id: i64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every order
    Orders,
    /// Toggle an order between pending and delivered
    ToggleOrder {
        /// Order id
        id: i64,
    },
    /// Delete an order
    DeleteOrder {
        /// Order id
        id: i64,
    },
    /// List contact messages
    Messages,
    /// Toggle a message between pending and resolved
    ResolveMessage {
        /// Message id
        id: i64,
    },
    /// Delete a contact message
    DeleteMessage {
        /// Message id
        id: i64,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run()?,
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                query,
                category,
                sort,
            } => commands::catalog::list(query.as_deref(), category.as_deref(), sort.as_deref())?,
            CatalogAction::Add {
                name,
                price,
                category,
                image,
                description,
            } => commands::catalog::add(&name, price, &category, &image, &description)?,
            CatalogAction::Remove { id } => commands::catalog::remove(id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id } => commands::cart::add(id)?,
            CartAction::Increase { id } => commands::cart::increase(id)?,
            CartAction::Decrease { id } => commands::cart::decrease(id)?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Account { action } => match action {
            AccountAction::Signup {
                name,
                email,
                password,
            } => commands::account::signup(&name, &email, &password)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&email, &password)?;
            }
            AccountAction::Logout => commands::account::logout()?,
            AccountAction::Whoami => commands::account::whoami()?,
        },
        Commands::Checkout {
            name,
            address,
            phone,
            payment,
        } => commands::orders::checkout(&name, &address, &phone, &payment)?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list()?,
            OrdersAction::Track { id } => commands::orders::track(id)?,
            OrdersAction::Cancel { id } => commands::orders::cancel(id)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders => commands::admin::orders()?,
            AdminAction::ToggleOrder { id } => commands::admin::toggle_order(id)?,
            AdminAction::DeleteOrder { id } => commands::admin::delete_order(id)?,
            AdminAction::Messages => commands::admin::messages()?,
            AdminAction::ResolveMessage { id } => commands::admin::resolve_message(id)?,
            AdminAction::DeleteMessage { id } => commands::admin::delete_message(id)?,
        },
        Commands::Contact {
            name,
            email,
            message,
        } => commands::contact::send(&name, &email, &message)?,
    }
    Ok(())
}
