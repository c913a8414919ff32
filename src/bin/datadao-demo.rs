//! Walkthrough of the DataDAO client against a live deployment.
//!
//! Reads the signing key from `DATADAO_PRIVATE_KEY` and the storage API key
//! from `DATADAO_STORAGE_API_KEY`. Each step reports its own failure and the
//! walkthrough continues, so a partially configured environment still shows
//! what it can.

use alloy::primitives::U256;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datadao_client::tasks::{NewTask, PrivacyLevel, TaskType};
use datadao_client::{load_config, ClientConfig, DataDaoClient};

#[derive(Parser)]
#[command(name = "datadao-demo")]
#[command(about = "Exercise the DataDAO client end to end", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Chain RPC endpoint, overriding the config file.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Contract registry address, overriding the config file.
    #[arg(long)]
    registry: Option<String>,
}

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

fn as_tokens(amount: U256) -> f64 {
    // Display only; precision loss past 2^53 is acceptable here
    amount.to_string().parse::<f64>().unwrap_or(f64::INFINITY) / ONE_TOKEN as f64
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datadao_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => load_config(&path)?,
        None => ClientConfig::default(),
    };
    if let Some(rpc_url) = cli.rpc_url {
        config.chain.rpc_url = rpc_url;
    }
    if let Some(registry) = cli.registry {
        config.chain.registry_address = Some(registry);
    }

    let client = DataDaoClient::connect(config).await?;

    println!("Getting DAO statistics...");
    let stats = client.dao_stats().await?;
    println!("Member count: {}", stats.member_count);
    println!("Task count: {}", stats.task_count);
    println!("Dataset count: {}", stats.dataset_count);
    println!("Proposal count: {}", stats.proposal_count);

    println!("\nGetting token balance...");
    let mut balance = client.token_balance(None).await?;
    println!("Token balance: {} dataFIL", as_tokens(balance));

    // Top up from the faucet when under 100 tokens
    if balance < U256::from(100) * U256::from(ONE_TOKEN) {
        println!("\nClaiming tokens from faucet...");
        match client.claim_from_faucet().await {
            Ok(outcome) => {
                println!("Faucet claim successful: {}", outcome.success);
                balance = client.token_balance(None).await?;
                println!("New token balance: {} dataFIL", as_tokens(balance));
            }
            Err(e) => println!("Error claiming from faucet: {e}"),
        }
    }

    println!("\nChecking DAO membership...");
    let mut is_member = client.is_member(None).await?;
    println!("Is member: {is_member}");

    if !is_member {
        println!("\nJoining the DAO...");
        match client
            .join_dao(U256::from(100) * U256::from(ONE_TOKEN))
            .await
        {
            Ok(outcome) => {
                println!("DAO join successful: {}", outcome.join.success);
                is_member = client.is_member(None).await?;
                println!("Is member now: {is_member}");
            }
            Err(e) => println!("Error joining DAO: {e}"),
        }
    }

    if is_member {
        println!("\nGetting member details...");
        match client.member_info(None).await {
            Ok(member) => {
                println!("Member tier: {}", member.tier);
                println!("Reputation: {}", member.reputation);
                println!("Staked amount: {} dataFIL", as_tokens(member.staked_amount));
                println!("Joined at: {}", member.joined_at);
            }
            Err(e) => println!("Error getting member details: {e}"),
        }
    }

    println!("\nCreating a data collection task...");
    let deadline = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs()
        + 7 * 24 * 60 * 60;
    let task = NewTask {
        title: "Collect images of cats".to_string(),
        description: "We need high-quality images of cats for our dataset".to_string(),
        task_type: TaskType::DataCollection,
        reward: U256::from(10) * U256::from(ONE_TOKEN),
        review_reward: U256::from(2) * U256::from(ONE_TOKEN),
        required_submissions: 5,
        required_validations: 2,
        deadline,
        privacy_level: PrivacyLevel::Public,
        access_conditions_cid: String::new(),
        instructions_cid: String::new(),
    };
    match client.create_task(task).await {
        Ok(outcome) => {
            if let Some(task_id) = outcome.task_id {
                println!("Task created with ID: {task_id}");

                println!("\nGetting task details...");
                match client.task(task_id).await {
                    Ok(task) => {
                        println!("Task title: {}", task.title);
                        println!("Task reward: {} dataFIL", as_tokens(task.reward));
                        println!("Required submissions: {}", task.required_submissions);
                        println!("Deadline: {}", task.deadline);
                    }
                    Err(e) => println!("Error getting task: {e}"),
                }
            } else {
                println!("Task transaction confirmed but no id was emitted");
            }
        }
        Err(e) => println!("Error creating task: {e}"),
    }

    println!("\nTotal datasets: {}", stats.dataset_count);
    if stats.dataset_count > U256::ZERO {
        println!("\nGetting details of the first dataset...");
        match client.dataset(U256::ZERO).await {
            Ok(dataset) => {
                println!("Dataset name: {}", dataset.name);
                println!("Dataset description: {}", dataset.description);
                println!("Dataset owner: {}", dataset.owner);
                println!("Dataset price: {} dataFIL", as_tokens(dataset.price));
                println!("Dataset access type: {:?}", dataset.access_type);
                println!("Dataset validated: {}", dataset.validated);
            }
            Err(e) => println!("Error getting dataset: {e}"),
        }
    }

    println!("\nTotal proposals: {}", stats.proposal_count);
    if stats.proposal_count > U256::ZERO {
        println!("\nGetting details of the first proposal...");
        match client.proposal(U256::ZERO).await {
            Ok(proposal) => {
                println!("Proposal title: {}", proposal.title);
                println!("Proposal description: {}", proposal.description);
                println!("Proposal status: {}", proposal.status);
                println!("For votes: {} dataFIL", as_tokens(proposal.for_votes));
                println!("Against votes: {} dataFIL", as_tokens(proposal.against_votes));
                println!("End time: {}", proposal.end_time);
            }
            Err(e) => println!("Error getting proposal: {e}"),
        }
    }

    Ok(())
}
