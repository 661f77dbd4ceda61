use camino::Utf8PathBuf;
use clap::Parser;
use defect_metrics::Result;
use defect_metrics::defects::{self, DefectFactory};

#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Number of defect records to generate
    #[arg(long, short = 'n', default_value_t = 50, value_name = "COUNT")]
    pub count: usize,

    /// Seed for deterministic generation
    #[arg(long, default_value_t = 0, value_name = "SEED")]
    pub seed: u64,

    /// Number of distinct sprints to spread records across
    #[arg(long, default_value_t = 6, value_name = "COUNT")]
    pub sprints: u32,

    /// Where to write the generated defect record file
    #[arg(long, short = 'o', default_value = "sample-defects.json", value_name = "PATH")]
    pub output: Utf8PathBuf,
}

pub fn generate_sample(args: &SampleArgs) -> Result<()> {
    let records = DefectFactory::new(args.seed).with_sprints(args.sprints).create_batch(args.count);
    defects::save(&args.output, &records)?;
    println!("Wrote {} generated defect record(s) to {}", records.len(), args.output);
    Ok(())
}
