use crate::allocate::Assignment;
use crate::task::TaskId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Bar colors, handed out per developer in order of first appearance.
pub const PALETTE: [&str; 10] = [
    "#4F46E5", "#EC4899", "#10B981", "#F59E0B", "#EF4444", "#3B82F6", "#8B5CF6", "#6366F1",
    "#A855F7", "#14B8A6",
];

const MAX_LABEL: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttBar {
    /// `"<taskId>-<developerName>"`
    pub id: String,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub developer: String,
    pub color: String,
    /// Owning task for sub-tasks.
    pub project: Option<TaskId>,
    pub dependencies: Vec<TaskId>,
    pub estimated_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub developer: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanttChart {
    pub bars: Vec<GanttBar>,
    pub legend: Vec<LegendEntry>,
}

impl GanttChart {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut legend: Vec<LegendEntry> = Vec::new();
        let mut bars = Vec::with_capacity(assignments.len());

        for a in assignments {
            let color = match legend.iter().find(|l| l.developer == a.developer_name) {
                Some(entry) => entry.color.clone(),
                None => {
                    let color = PALETTE[legend.len() % PALETTE.len()].to_string();
                    legend.push(LegendEntry {
                        developer: a.developer_name.clone(),
                        color: color.clone(),
                    });
                    color
                }
            };

            let parent = a.parent_id.clone().filter(|_| a.is_subtask);
            bars.push(GanttBar {
                id: format!("{}-{}", a.task_id, a.developer_name),
                name: a.task_title.clone(),
                start: a.start_date,
                end: a.end_date,
                developer: a.developer_name.clone(),
                color,
                dependencies: parent.iter().cloned().collect(),
                project: parent,
                estimated_hours: a.estimated_hours,
            });
        }

        Self { bars, legend }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Earliest start and latest end across all bars.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.bars.iter().map(|b| b.start).min()?;
        let end = self.bars.iter().map(|b| b.end).max()?;
        Some((start, end))
    }

    /// ASCII timeline, one row per bar, `width` columns for the time axis.
    pub fn render_text(&self, width: usize) -> String {
        let Some((start, end)) = self.span() else {
            return "No tasks to display\n".to_string();
        };
        let width = width.max(10);
        let total = (end - start).num_minutes().max(1) as f64;
        let column = |t: NaiveDateTime| -> usize {
            let offset = (t - start).num_minutes() as f64;
            ((offset / total) * width as f64).round() as usize
        };

        let labels: Vec<String> = self.bars.iter().map(|b| truncate(&b.name)).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut out = format!(
            "{:label_width$}  {} .. {}\n",
            "",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );
        for (bar, label) in self.bars.iter().zip(&labels) {
            let from = column(bar.start).min(width - 1);
            let to = column(bar.end).clamp(from + 1, width);
            let line: String = (0..width)
                .map(|i| if (from..to).contains(&i) { '#' } else { ' ' })
                .collect();
            let pad = label_width - label.chars().count();
            out.push_str(&format!(
                "{label}{:pad$}  |{line}| {}\n",
                "",
                bar.developer
            ));
        }
        out
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_LABEL - 3).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::schedule;
    use crate::calendar::epoch_for;
    use crate::developer::Developer;
    use crate::task::Task;
    use chrono::NaiveDate;

    fn sample() -> Vec<Assignment> {
        let epoch = epoch_for(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 9);
        let tasks = [
            Task::new(1, "Release")
                .with_estimate(8.0)
                .with_sub_task(Task::new(1, "Tag build").with_estimate(16.0)),
            Task::new(2, "Docs").with_estimate(8.0),
        ];
        let devs = [Developer::new(1, "Ann", 40.0), Developer::new(2, "Ben", 40.0)];
        schedule(&tasks, &devs, epoch).unwrap().assignments
    }

    #[test]
    fn empty_chart() {
        let chart = GanttChart::from_assignments(&[]);
        assert!(chart.is_empty());
        assert!(chart.span().is_none());
        assert_eq!(chart.render_text(40), "No tasks to display\n");
    }

    #[test]
    fn bars_carry_ids_colors_and_parents() {
        let chart = GanttChart::from_assignments(&sample());
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.legend[0].color, PALETTE[0]);
        assert_eq!(chart.legend[1].color, PALETTE[1]);

        let sub = chart.bars.iter().find(|b| b.name == "Release > Tag build").unwrap();
        assert_eq!(sub.project, Some(TaskId::from(1)));
        assert_eq!(sub.dependencies, vec![TaskId::from(1)]);
        assert!(sub.id.starts_with("1-1-"));

        let top = chart.bars.iter().find(|b| b.name == "Docs").unwrap();
        assert!(top.project.is_none() && top.dependencies.is_empty());
        let legend_color = &chart
            .legend
            .iter()
            .find(|l| l.developer == top.developer)
            .unwrap()
            .color;
        assert_eq!(&top.color, legend_color);
    }

    #[test]
    fn palette_cycles() {
        let epoch = epoch_for(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 9);
        let tasks: Vec<Task> = (1..=12)
            .map(|i| Task::new(i, format!("T{i}")).with_estimate(4.0))
            .collect();
        let devs: Vec<Developer> = (1..=12)
            .map(|i| Developer::new(i, format!("D{i}"), 40.0))
            .collect();
        let out = schedule(&tasks, &devs, epoch).unwrap();
        let chart = GanttChart::from_assignments(&out.assignments);
        assert_eq!(chart.legend.len(), 12);
        assert_eq!(chart.legend[10].color, PALETTE[0]);
    }

    #[test]
    fn text_rendering_spans_the_axis() {
        let chart = GanttChart::from_assignments(&sample());
        let text = chart.render_text(30);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("2026-10-14 .."));
        for line in &lines[1..] {
            let bar = line.split('|').nth(1).unwrap();
            assert_eq!(bar.chars().count(), 30);
            assert!(bar.contains('#'));
        }
        // the first bar starts at the epoch, the chart ends with the last bar
        assert!(lines[1].split('|').nth(1).unwrap().starts_with('#'));
        assert!(lines.iter().any(|l| l.split('|').nth(1).is_some_and(|b| b.ends_with('#'))));
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "x".repeat(80);
        assert_eq!(truncate(&name).chars().count(), MAX_LABEL);
        assert!(truncate(&name).ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }
}
