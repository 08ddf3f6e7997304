use meteo_summary::{summarize, Observation};
use miette::{IntoDiagnostic, WrapErr};

fn main() -> miette::Result<()> {
    let file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("demos/observations.json"));
    println!("opening {file}");
    let input = std::fs::read_to_string(&file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read `{file}`"))?;

    let observations: Vec<Observation> = serde_json::from_str(&input).into_diagnostic()?;
    let summaries = summarize(&observations)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summaries).into_diagnostic()?
    );
    Ok(())
}
