use clap::Args;

use xlr_scaffold::features::{ExtXml, TestFramework};
use xlr_scaffold::generator::{AppGenerator, GenerationReport};
use xlr_scaffold::prompt::PresetPrompter;

use super::{run_generator, CmdResult, ProjectArgs};

#[derive(Args, Debug)]
pub struct AppArgs {
    /// Plugin name (defaults to the kebab-cased directory name)
    #[arg(long)]
    pub plugin_name: Option<String>,

    /// Default namespace for synthetic types
    #[arg(long)]
    pub namespace: Option<String>,

    /// Extension XML to generate (repeatable)
    #[arg(long = "ext-xml", value_name = "KIND")]
    pub ext_xml: Vec<ExtXml>,

    /// Test framework to set up (repeatable)
    #[arg(long = "test-framework", value_name = "NAME")]
    pub test_framework: Vec<TestFramework>,

    /// Answer the extension XML question with an empty selection
    #[arg(long, conflicts_with = "ext_xml")]
    pub no_ext_xml: bool,

    /// Answer the test framework question with an empty selection
    #[arg(long, conflicts_with = "test_framework")]
    pub no_tests: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

fn preset(args: &AppArgs) -> PresetPrompter<'static> {
    let mut preset = PresetPrompter::new();
    if let Some(name) = &args.plugin_name {
        preset = preset.text("pluginName", name);
    }
    if let Some(namespace) = &args.namespace {
        preset = preset.text("namespace", namespace);
    }
    if !args.ext_xml.is_empty() || args.no_ext_xml {
        preset = preset.choices("extXmls", args.ext_xml.iter().map(ExtXml::as_str));
    }
    if !args.test_framework.is_empty() || args.no_tests {
        preset = preset.choices("testFrameworks", args.test_framework.iter().map(TestFramework::as_str));
    }
    preset
}

pub fn run(args: AppArgs) -> CmdResult<GenerationReport> {
    let mut generator = AppGenerator::new();
    run_generator(&mut generator, preset(&args), &args.project)
}
