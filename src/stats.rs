// ============================================================================
// stats.rs — Aviary
// Generation statistics formatted as the text-panel block.
// ============================================================================

use crate::engine::GenerationStatistics;

/// Build the statistics panel text: six `label: value` lines. Fitness lines
/// are never omitted; before the first generation completes they carry the
/// literal placeholder `null`.
pub fn format_stats(
    generation: u32,
    generation_steps: u32,
    stats: Option<&GenerationStatistics>,
) -> String {
    format!(
        "Generation: {}\n\
         Generation steps: {}\n\
         {}\n{}\n{}\n{}",
        generation,
        generation_steps,
        fitness_line("Max fitness", stats.map(|s| s.max_fitness)),
        fitness_line("Min fitness", stats.map(|s| s.min_fitness)),
        fitness_line("Mean fitness", stats.map(|s| s.mean_fitness)),
        fitness_line("Std fitness", stats.map(|s| s.std_fitness)),
    )
}

fn fitness_line(label: &str, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{}: {}", label, value),
        None => format!("{}: null", label),
    }
}
