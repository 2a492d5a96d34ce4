use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use howlite_loadtest::args::LoadArgs;
use howlite_loadtest::engine::{LoadPlan, run_load};
use howlite_loadtest::error::AppResult;
use howlite_loadtest::metrics::{summary_lines, write_summary_json};
use howlite_loadtest::scenario::RequestGenerator;
use howlite_loadtest::shutdown::shutdown_channel;
use howlite_loadtest::shutdown_handlers::setup_signal_shutdown_handler;

struct DumpRequestsPlan {
    generator: RequestGenerator,
    count: usize,
}

struct LocalRun {
    plan: LoadPlan,
    summary_export: Option<String>,
}

enum RunPlan {
    DumpRequests(DumpRequestsPlan),
    Local(LocalRun),
}

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    match build_plan(args, &matches)? {
        RunPlan::DumpRequests(dump) => {
            dump_requests(&dump);
            Ok(())
        }
        RunPlan::Local(local) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_local(local))
        }
    }
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().get_matches();
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn build_plan(mut args: LoadArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = howlite_loadtest::config::load_config(args.config.as_deref())? {
        howlite_loadtest::config::apply_config(&mut args, matches, &config)?;
    }

    if let Some(count) = args.dump_requests {
        let generator = RequestGenerator::from_args(&args)?;
        return Ok(RunPlan::DumpRequests(DumpRequestsPlan {
            generator,
            count: count.get(),
        }));
    }

    let plan = LoadPlan::from_args(&args)?;
    Ok(RunPlan::Local(LocalRun {
        plan,
        summary_export: args.summary_export,
    }))
}

async fn run_local(local: LocalRun) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = run_load(local.plan, &shutdown_tx).await;
    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::debug!("Signal handler task ended abnormally: {}", err);
    }
    let summary = result?;

    for line in summary_lines(&summary) {
        println!("{}", line);
    }

    if let Some(path) = local.summary_export.as_deref() {
        write_summary_json(Path::new(path), &summary)?;
        tracing::info!("Summary written to {}", path);
    }

    Ok(())
}

fn dump_requests(plan: &DumpRequestsPlan) {
    for _ in 0..plan.count {
        let request = plan.generator.generate();
        println!("{} {} {}", request.method, request.url, request.body);
    }
}
