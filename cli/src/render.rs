// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Cursor};
use std::path::PathBuf;

use dayprint_core::{ResolvedAttendee, Schedule, ScheduleRow};
use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, Table, TableCell, TableRow,
    WidthType,
};
use jiff::civil::Date;
use tokio::fs;

use crate::config::OutputConfig;

/// Column widths in twentieths of a point: 3, 4, 4 and 8 cm.
const COLUMN_WIDTHS: [usize; 4] = [1701, 2268, 2268, 4536];

/// 1.5 cm on every side.
const PAGE_MARGIN: i32 = 850;

const HEADERS: [&str; 4] = ["Time", "Subject", "Location", "Attendees"];

/// Failure to produce the document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build document: {0}")]
    Pack(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `<prefix><DD.MM.YY>.docx`
pub fn file_name(prefix: &str, date: Date) -> String {
    format!("{prefix}{}.docx", date.strftime("%d.%m.%y"))
}

/// Writes the schedule as a Word document into the output directory and
/// returns its path. Nothing is written if the document cannot be built.
#[tracing::instrument(skip(schedule), fields(date = %schedule.date))]
pub async fn write_schedule(
    schedule: &Schedule,
    output: &OutputConfig,
) -> Result<PathBuf, RenderError> {
    fs::create_dir_all(&output.dir)
        .await
        .map_err(|source| RenderError::CreateDir {
            path: output.dir.clone(),
            source,
        })?;

    let mut buf = Cursor::new(Vec::new());
    schedule_document(schedule, &output.title)
        .build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Pack(e.to_string()))?;

    let path = output
        .dir
        .join(file_name(&output.filename_prefix, schedule.date));
    fs::write(&path, buf.into_inner())
        .await
        .map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), rows = schedule.rows.len(), "wrote schedule");
    Ok(path)
}

/// Lays out the schedule: title, date, then a table of meetings or a note
/// that there are none.
pub fn schedule_document(schedule: &Schedule, title: &str) -> Docx {
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN)
                .right(PAGE_MARGIN),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(title).bold().size(32))
                .align(AlignmentType::Center),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(schedule.date.strftime("%d.%m.%Y").to_string())
                        .size(24),
                )
                .align(AlignmentType::Center),
        )
        .add_paragraph(Paragraph::new());

    if schedule.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("No meetings scheduled.")),
        );
        return docx;
    }

    let mut rows = vec![header_row()];
    rows.extend(schedule.rows.iter().map(meeting_row));
    docx.add_table(Table::new(rows).set_grid(COLUMN_WIDTHS.to_vec()))
}

fn header_row() -> TableRow {
    let cells = HEADERS
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(header, width)| {
            cell(width).add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(*header).bold())
                    .align(AlignmentType::Center),
            )
        })
        .collect();
    TableRow::new(cells)
}

fn meeting_row(row: &ScheduleRow) -> TableRow {
    let [time, subject, location, attendees] = COLUMN_WIDTHS;
    TableRow::new(vec![
        cell(time).add_paragraph(lines(&row.time_cell())),
        cell(subject).add_paragraph(lines(&row.subject)),
        cell(location).add_paragraph(lines(&row.location)),
        cell(attendees).add_paragraph(attendee_paragraph(row)),
    ])
}

fn cell(width: usize) -> TableCell {
    TableCell::new().width(width, WidthType::Dxa)
}

/// A paragraph with line breaks in place of `\n`.
fn lines(text: &str) -> Paragraph {
    let mut paragraph = Paragraph::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            paragraph = paragraph.add_run(Run::new().add_break(BreakType::TextWrapping));
        }
        paragraph = paragraph.add_run(Run::new().add_text(line));
    }
    paragraph
}

/// Required attendees, then the optional ones under their own heading.
/// Each line is `<marker> Name (email)` or `<marker> email`, the address in
/// italics.
fn attendee_paragraph(row: &ScheduleRow) -> Paragraph {
    let mut paragraph = Paragraph::new();
    let mut first = true;
    let mut line_break = |paragraph: Paragraph| {
        if std::mem::replace(&mut first, false) {
            paragraph
        } else {
            paragraph.add_run(Run::new().add_break(BreakType::TextWrapping))
        }
    };

    for attendee in row.required_attendees() {
        paragraph = attendee_line(line_break(paragraph), attendee);
    }

    let mut optional = row.optional_attendees().peekable();
    if optional.peek().is_some() {
        paragraph =
            line_break(paragraph).add_run(Run::new().add_text("Optional attendees:").bold());
        for attendee in optional {
            paragraph = attendee_line(line_break(paragraph), attendee);
        }
    }
    paragraph
}

fn attendee_line(paragraph: Paragraph, attendee: &ResolvedAttendee) -> Paragraph {
    let marker = format!("{} ", attendee.status.marker());
    let paragraph = paragraph.add_run(Run::new().add_text(marker));
    match &attendee.name {
        Some(name) => paragraph
            .add_run(Run::new().add_text(format!("{name} (")))
            .add_run(Run::new().add_text(&attendee.email).italic())
            .add_run(Run::new().add_text(")")),
        None => paragraph.add_run(Run::new().add_text(&attendee.email).italic()),
    }
}
