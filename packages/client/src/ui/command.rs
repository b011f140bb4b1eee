//! Subcommands of the `chessearn` binary.

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone_number: String,
        /// Prompted for when omitted
        #[arg(long, env = "CHESSEARN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in with an email, username or phone number
    Login {
        identifier: String,
        /// Prompted for when omitted
        #[arg(long, env = "CHESSEARN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored credentials
    Logout,

    /// Show your profile
    Profile,

    /// Create a game and wait for an opponent
    Create {
        /// Base time in seconds
        #[arg(long, default_value_t = 300)]
        base_time: u32,
        /// Increment per move in seconds
        #[arg(long, default_value_t = 0)]
        increment: u32,
        #[arg(long)]
        unrated: bool,
        /// Stake for the game
        #[arg(long)]
        bet: Option<f64>,
        /// Start playing right away
        #[arg(long)]
        play: bool,
    },

    /// Join an open game
    Join {
        game_id: String,
        /// Start playing right away
        #[arg(long)]
        play: bool,
    },

    /// List games waiting for an opponent
    Open {
        /// Keep refreshing at the configured poll interval
        #[arg(long)]
        follow: bool,
    },

    /// List past games
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
        /// Another player's history
        #[arg(long)]
        user: Option<String>,
    },

    /// Show one of your games
    Show { game_id: String },

    /// Play one of your games live
    Play { game_id: String },

    /// Spectate a game live
    Watch { game_id: String },
}
