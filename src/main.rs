//! platelet's application entry point.
//! Parses arguments, sets up logging and hands over to the pipeline.

use platelet::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::{Outcome, Pipeline},
    prompt::DialoguerPrompter,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let pipeline = Pipeline::from_args(args)?;
    let prompt = DialoguerPrompter::new();

    match pipeline.run(&prompt)? {
        Outcome::Aborted => println!("Aborting."),
        Outcome::Written(touched) if pipeline.options.dry_run => {
            println!("Dry run: {} path(s) would be written.", touched.len())
        }
        Outcome::Serialized { saved: true, .. } => {
            println!("Template written to {}.", pipeline.template.display())
        }
        Outcome::Written(_) | Outcome::Serialized { .. } | Outcome::Variables(_) => {}
    }
    Ok(())
}
