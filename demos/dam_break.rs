use swforce::field::*;
use swforce::image::*;
use swforce::initial_conditions::*;
use swforce::simulator::*;
use swforce::swe_example::*;
use swforce::vtk::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    let args = Args::cli_setup("dam_break")?;

    let params = args.step_params();
    let config = args.kernel_config()?;
    let mut initial = BufferSet::new(params.nx, params.ny, 1)?;
    generate_ic(&mut initial, args.ic_type());
    let (lo, hi) = (0.0, 1.0 + args.dial.abs().max(1.0));

    let mut sim = Simulator::new(initial, params, config, args.sweep_order)?;
    let mass_0 = sim.state().total_mass();
    write_frame(&args, &sim, 0, lo, hi)?;

    for i in 1..args.images {
        profiling::scope!("image");
        let t_end = sim.time() + args.steps_per_image as f64 * params.dt;
        sim.simulate(t_end);
        log::info!(
            "image {}: t {:.4}, steps {}, mass drift {:e}",
            i,
            sim.time(),
            sim.steps(),
            sim.state().total_mass() - mass_0
        );
        write_frame(&args, &sim, i, lo, hi)?;
        profiling::finish_frame!();
    }

    args.finish();
    Ok(())
}

fn write_frame(
    args: &Args,
    sim: &Simulator,
    i: usize,
    lo: f64,
    hi: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.write_images {
        if let Some(path) = args.frame_name(i) {
            depth_png(sim.state(), &path, lo, hi)?;
        }
    }
    if args.write_vtk {
        if let Some(path) = args.vtk_name(i) {
            let params = sim.params();
            write_vtk2d(sim.state(), params.dx, params.dy, &path)?;
        }
    }
    Ok(())
}
