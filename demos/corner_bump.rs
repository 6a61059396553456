use swforce::config::*;
use swforce::field::*;
use swforce::initial_conditions::*;
use swforce::kernel::*;
use swforce::util::*;

/// One split step of a 4x4 lake at rest with a raised corner cell.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let params = StepParams {
        nx: 4,
        ny: 4,
        dx: 1.0,
        dy: 1.0,
        dt: 0.05,
        g: 9.81,
    };
    let config = KernelConfig::default().with_block(2, 2);

    let mut current = BufferSet::new(4, 4, 1)?;
    generate_ic(
        &mut current,
        ICType::CornerBump {
            depth: 1.0,
            bump: 1.0,
        },
    );
    let mut next = BufferSet::new(4, 4, 1)?;
    checked_force_step(
        &params,
        &config,
        SweepOrder::XThenY.axes_for_step(0),
        &current,
        &mut next,
    )?;

    for y in 0..4 {
        let row: Vec<String> = (0..4)
            .map(|x| format!("{:.6}", next.h.get(&vector![x, y])))
            .collect();
        log::info!("h[{}]: {}", y, row.join(" "));
    }
    log::info!(
        "mass before {} after {}",
        current.total_mass(),
        next.total_mass()
    );
    Ok(())
}
