//! Command-line front end.
//!
//! Loads a process file, validates it, replays it under each requested
//! discipline in order, and renders the reports. All simulation logic
//! lives in the library; this binary only parses arguments and formats
//! output.

use std::error::Error;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use procsim::{loader, validation, Discipline, SimulationRun, Simulator};

#[derive(Debug, Parser)]
#[command(
    name = "procsim",
    version,
    about = "Discrete-event CPU/IO scheduling simulator"
)]
struct Cli {
    /// Disciplines to replay, in order: sjf, srtf, rr, vrr (defaults to sjf)
    #[arg(value_name = "DISCIPLINE")]
    disciplines: Vec<Discipline>,

    /// Process file: one `name;arrival;cpu;io;rate` record per line
    #[arg(short, long, default_value = "procs.proc")]
    input: PathBuf,

    /// Time quantum for rr and vrr
    #[arg(short, long, default_value = "5")]
    quantum: NonZeroU64,

    /// Emit each run report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also print the per-tick CPU/IO trace
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let processes = loader::load_processes(&cli.input)?;
    if let Err(errors) = validation::validate_processes(&processes) {
        for e in &errors {
            eprintln!("invalid process set: {e}");
        }
        return Err(format!("{} validation error(s) in {}", errors.len(), cli.input.display()).into());
    }

    let disciplines = if cli.disciplines.is_empty() {
        vec![Discipline::Sjf]
    } else {
        cli.disciplines.clone()
    };

    let mut sim = Simulator::new().with_quantum(cli.quantum);
    for discipline in disciplines {
        let report = sim.run(&processes, discipline);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report, cli.trace);
        }
    }
    Ok(())
}

fn print_report(run: &SimulationRun, trace: bool) {
    println!("== {} ==", run.discipline);
    println!("process\tarrival\tstart\tcomplete\tturnaround\twaiting\tresponse");
    for p in &run.completed {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            p.name,
            p.arrival,
            p.start_time().unwrap_or(0),
            p.completion_time().unwrap_or(0),
            p.turnaround_time().unwrap_or(0),
            p.waiting_time().unwrap_or(0),
            p.response_time().unwrap_or(0),
        );
    }

    let m = &run.metrics;
    println!("avg waiting time    {:.3}", m.avg_waiting);
    println!("avg turnaround time {:.3}", m.avg_turnaround);
    println!("avg response time   {:.3}", m.avg_response);
    println!("total ticks         {}", m.total_ticks);
    println!("busy ticks          {}", m.busy_ticks);
    println!("cpu utilization     {:.2} %", m.cpu_utilization);
    println!("throughput          {:.4}", m.throughput);

    if trace {
        println!("tick\tcpu\tio");
        for (tick, (cpu, io)) in run
            .cpu_timeline
            .iter()
            .zip(run.io_timeline.iter())
            .enumerate()
        {
            println!(
                "{}\t{}\t{}",
                tick,
                cpu.as_deref().unwrap_or("-"),
                io.as_deref().unwrap_or("-"),
            );
        }
    }
    println!();
}
