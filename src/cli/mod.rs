use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a quest, either from a description or invented by the model
    Generate {
        /// Free-text quest description to structure; omit to let the model invent one
        #[arg(short, long)]
        description: Option<String>,

        /// Reject quests with empty data or blank names
        #[arg(long)]
        strict: bool,
    },

    /// Hold a multi-turn conversation, one turn per prompt
    Chat {
        /// Prompts sent in order as user turns
        #[arg(required = true)]
        prompts: Vec<String>,

        /// System directive placed before the first turn
        #[arg(short, long)]
        system: Option<String>,
    },
}
