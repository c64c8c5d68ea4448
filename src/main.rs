use log::info;
use scv_decomp::utils::test::{fixtures, synthetic_income_batch, timed_execution};
use scv_decomp::{Decomposer, DecompositionConfig, GroupOrder};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let batch = synthetic_income_batch(10_000, 42)?;
    info!("Generated {} synthetic income records", batch.num_rows());

    let config = DecompositionConfig {
        group_order: GroupOrder::Sorted,
        ..Default::default()
    };

    for feature in ["region", "gender"] {
        let decomposer = Decomposer::new("total")
            .with_feature(feature)
            .with_sources(fixtures::SOURCES)
            .with_weights("weight")
            .with_config(config.clone());

        let (elapsed, result) = timed_execution(|| decomposer.decompose(&batch));
        let decomposition = result?;
        info!("Decomposed by {feature} in {elapsed:?}");

        println!("Income inequality by source and {feature}:");
        println!("{decomposition}");
        println!(
            "Sum of contributions: {:.6} (population SCV {:.6})\n",
            decomposition.total(),
            decomposition.population().scv
        );
    }

    Ok(())
}
