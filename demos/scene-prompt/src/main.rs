//! Command-line front end: describe a scene, get image and video prompts.
//!
//! ```text
//! API_KEY=... scene-prompt "一位身穿红衣的女侠客，站在竹林中" --tag 光影=rim lighting=侧逆光
//! ```

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use moying::app::gemini_controller;
use moying::config::GeneratorSettings;
use moying::kernel::ViewState;
use moying::primitives::{GeneratedResult, GenerationStatus, TagId, TagOption};
use moying::telemetry::init_tracing;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "scene-prompt",
    about = "Turn a short scene description into Gufeng image and video prompts"
)]
struct Cli {
    /// Scene description, in Chinese or English.
    scene: Option<String>,

    /// Extra style element, as `category=value` or `category=value=label`.
    #[arg(long = "tag", value_parser = parse_tag)]
    tags: Vec<TagSpec>,

    /// Print the whole view state as JSON instead of formatted text.
    #[arg(long)]
    json: bool,

    /// Print the effective settings (without the credential) and exit.
    #[arg(long)]
    show_config: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn")]
    log: String,
}

#[derive(Clone, Debug)]
struct TagSpec {
    category: String,
    value: String,
    label: Option<String>,
}

impl TagSpec {
    fn into_option(self, index: usize) -> Result<TagOption> {
        let id = TagId::new(format!("cli-tag-{index}"))?;
        let label = self.label.unwrap_or_else(|| self.value.clone());
        Ok(TagOption::new(id, label, self.value, self.category))
    }
}

fn parse_tag(raw: &str) -> Result<TagSpec, String> {
    let mut parts = raw.splitn(3, '=').map(str::trim);
    let category = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    if category.is_empty() || value.is_empty() {
        return Err(format!("expected category=value[=label], got `{raw}`"));
    }
    let label = parts.next().filter(|label| !label.is_empty());
    Ok(TagSpec {
        category: category.to_owned(),
        value: value.to_owned(),
        label: label.map(str::to_owned),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let settings = GeneratorSettings::from_env()?;
    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let Some(scene) = cli.scene else {
        bail!("a scene description is required");
    };

    let controller = gemini_controller(&settings)?;
    controller.set_input(scene);
    for (index, spec) in cli.tags.into_iter().enumerate() {
        let tag = spec.into_option(index)?;
        debug!(category = tag.category(), value = tag.value(), "selecting tag");
        controller.toggle_tag(&tag);
    }

    info!(model = %settings.model, "generating prompts");
    controller.generate().await;
    let view = controller.snapshot();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if let Some(result) = view.result() {
        print_result(result);
    }

    match view.status() {
        GenerationStatus::Success => Ok(()),
        _ => Err(failure(&view)),
    }
}

fn failure(view: &ViewState) -> anyhow::Error {
    anyhow!(view.error().unwrap_or("generation did not complete").to_owned())
}

fn print_result(result: &GeneratedResult) {
    println!("== Image prompt ==\n{}\n", result.image_prompt());
    println!("== Video prompt ==\n{}\n", result.video_prompt());
    println!("== Explanation ==\n{}\n", result.explanation());

    println!("== Suggested tags ==");
    for category in result.suggested_categories() {
        let labels: Vec<String> = category
            .tags
            .iter()
            .map(|tag| format!("{} ({})", tag.label(), tag.value()))
            .collect();
        println!("{}: {}", category.name, labels.join(", "));
    }
}
