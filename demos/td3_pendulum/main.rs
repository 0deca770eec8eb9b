// Trains TD3 on the pendulum swing-up task, then plays one greedy episode.
//
// RUST_LOG=td3=debug cargo run --release --example td3_pendulum

use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
use td3::{
    algo::td3::{Td3Agent, Td3Config},
    env::Environment,
    gym::Pendulum,
    trainer::{evaluate, Trainer, TrainerConfig},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type TD3Backend = Autodiff<NdArray>;

const NUM_EPISODES: usize = 200;
const MAX_STEPS_PER_EPISODE: usize = 200;
const SEED: u64 = 13333;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("td3=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> td3::Result<()> {
    init_logging();

    let mut env = Pendulum::with_seed(MAX_STEPS_PER_EPISODE, SEED);

    let config = Td3Config::new()
        .with_memory_capacity(50_000)
        .with_batch_size(128)
        .with_exploration_steps(1_000)
        .with_gradient_clip(Some(1.0))
        .with_seed(Some(SEED));

    let mut agent: Td3Agent<TD3Backend> = Td3Agent::new(
        env.state_dim(),
        env.action_space(),
        config,
        NdArrayDevice::default(),
    )?;

    // A well-trained pendulum policy averages around -150
    let trainer = Trainer::new(
        TrainerConfig::new()
            .with_episodes(NUM_EPISODES)
            .with_score_window(10)
            .with_solved_score(Some(-200.0))
            .with_checkpoint_dir("runs/pendulum".into()),
    );
    let summary = trainer.train(&mut agent, &mut env)?;
    tracing::info!(?summary, "training complete");

    let test = evaluate(&mut agent, &mut env)?;
    tracing::info!(score = test.score, steps = test.steps, "greedy episode");

    Ok(())
}
