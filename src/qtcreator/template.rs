//! Project-file template rendering
//!
//! The templates are static Qt Creator project files with `<gen_xxx/>`
//! placeholders; rendering is plain string substitution, one template per
//! project-file format generation. The block between the target markers is
//! instantiated once per executable target.

use std::path::Path;

use crate::qtcreator::settings::QtCreatorSettings;
use crate::qtcreator::version::Version;

const TEMPLATE: &str = include_str!("../../templates/CMakeLists.txt.user.template");
const TEMPLATE_4_8: &str = include_str!("../../templates/CMakeLists.txt.user.template.4.8");
const TEMPLATE_PRE_4_8: &str = include_str!("../../templates/CMakeLists.txt.user.template.pre4.8");

const TARGET_BEGIN: &str = "<!-- gen_target_begin -->";
const TARGET_END: &str = "<!-- gen_target_end -->";

/// Everything the template substitution needs
pub struct RenderContext<'a> {
    pub settings: &'a QtCreatorSettings,
    pub project_dir: &'a Path,
    pub build_dir: &'a Path,
    pub bin_dir: &'a Path,
    pub install_dir: &'a Path,
    pub build_type: &'a str,
    pub targets: &'a [String],
}

/// Pick the template matching the installed Qt Creator's project-file format
pub fn pick(version: &Version) -> &'static str {
    if version.at_least("4.10") {
        TEMPLATE
    } else if version.matches_minor("4.8") || version.matches_minor("4.9") {
        TEMPLATE_4_8
    } else {
        TEMPLATE_PRE_4_8
    }
}

fn substitute(s: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(s.to_string(), |acc, (key, value)| acc.replace(key, value))
}

/// Render a template into the final project-file content
///
/// Blank lines and template comment lines are dropped from the output.
pub fn render(template: &str, ctx: &RenderContext) -> String {
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();

    let version = ctx.settings.version.to_string();
    let target_count = ctx.targets.len().to_string();
    let project_dir = ctx.project_dir.display().to_string();
    let build_dir = ctx.build_dir.display().to_string();
    let bin_dir = ctx.bin_dir.display().to_string();
    let install_dir = ctx.install_dir.display().to_string();

    let mut config = substitute(
        template,
        &[
            ("<gen_version/>", &version),
            ("<gen_time/>", &timestamp),
            ("<gen_envID/>", &ctx.settings.env_id),
            ("<gen_cmake_dir/>", &project_dir),
            ("<gen_cmake_build_type/>", ctx.build_type),
            ("<gen_build_dir/>", &build_dir),
            ("<gen_install_dir/>", &install_dir),
            ("<gen_conf/>", &ctx.settings.profile_id),
            ("<gen_target_count/>", &target_count),
        ],
    );

    config = expand_target_blocks(&config, ctx.targets, &bin_dir);

    config
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("!--"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the block between the target markers with one instance per target
fn expand_target_blocks(config: &str, targets: &[String], bin_dir: &str) -> String {
    let Some(begin) = config.find(TARGET_BEGIN) else {
        return config.to_string();
    };
    // block starts on the line after the begin marker
    let start = match config[begin..].find('\n') {
        Some(offset) => begin + offset + 1,
        None => return config.to_string(),
    };
    let Some(end) = config.find(TARGET_END) else {
        return config.to_string();
    };
    if end <= start {
        return config.to_string();
    }

    // exclude the newline preceding the end marker
    let block = &config[start..end - 1];

    let expanded: Vec<String> = targets
        .iter()
        .enumerate()
        .map(|(nb, target)| {
            substitute(
                block,
                &[
                    ("<gen_target_nb/>", nb.to_string().as_str()),
                    ("<gen_target_exec/>", target),
                    ("<gen_bin_dir/>", bin_dir),
                ],
            )
        })
        .collect();

    config.replacen(block, &expanded.join("\n"), 1)
}
