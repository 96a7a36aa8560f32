use crate::error::Result;
use crate::models::competency::{CompetencyLevel, EmployeeCompetency};
use rust_xlsxwriter::*;

pub struct ExportService;

impl ExportService {
    fn level_color(level: CompetencyLevel) -> Color {
        match level {
            CompetencyLevel::Expert => Color::RGB(0x10B981),       // Emerald
            CompetencyLevel::Advanced => Color::RGB(0x3B82F6),     // Blue
            CompetencyLevel::Intermediate => Color::RGB(0xF59E0B), // Amber
            CompetencyLevel::Beginner => Color::RGB(0xEF4444),     // Red
        }
    }

    /// Generate a styled XLSX competency matrix, one row per (employee, skill).
    pub fn generate_competencies_xlsx(competencies: &[EmployeeCompetency]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Competencies")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);

        let columns = [
            ("#", 8.0),
            ("Employee", 28.0),
            ("Skill", 30.0),
            ("Category", 16.0),
            ("Score (%)", 12.0),
            ("Level", 16.0),
            ("Assessed at", 20.0),
        ];
        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }
        let last_col = (columns.len() - 1) as u16;

        // Title
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(0, 0, 0, last_col, "Competency matrix", &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let subtitle = format!(
            "Exported: {}  •  Records: {}",
            chrono::Utc::now().format("%d.%m.%Y %H:%M UTC"),
            competencies.len()
        );
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;

        // Header
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 2;
        worksheet.set_row_height(header_row, 26)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, c) in competencies.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);

            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 1, &c.employee_id, &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(row, 2, &c.skill_name, &base_fmt)?;
            worksheet.write_string_with_format(row, 3, c.category.as_str(), &center_fmt)?;
            worksheet.write_number_with_format(row, 4, c.score as f64, &center_fmt)?;

            let level_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Self::level_color(c.level))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(row, 5, c.level.as_str(), &level_fmt)?;

            let assessed = c.assessed_at.format("%d.%m.%Y %H:%M").to_string();
            worksheet.write_string_with_format(row, 6, &assessed, &center_fmt)?;
        }

        // Summary
        let total_row = data_start_row + competencies.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        worksheet.set_row_height(total_row, 24)?;

        let count = |level: CompetencyLevel| competencies.iter().filter(|c| c.level == level).count();
        let summary = format!(
            "Expert: {} | Advanced: {} | Intermediate: {} | Beginner: {}",
            count(CompetencyLevel::Expert),
            count(CompetencyLevel::Advanced),
            count(CompetencyLevel::Intermediate),
            count(CompetencyLevel::Beginner),
        );
        worksheet.merge_range(total_row, 0, total_row, last_col, &summary, &summary_fmt)?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            header_row,
            0,
            (data_start_row + competencies.len() as u32).saturating_sub(1).max(header_row),
            last_col,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::SkillCategory;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn workbook_is_a_zip_container() {
        let rows = vec![EmployeeCompetency {
            id: Uuid::new_v4(),
            employee_id: "emp-1".into(),
            skill_name: "Negotiation".into(),
            category: SkillCategory::SoftSkills,
            score: 85,
            level: CompetencyLevel::Advanced,
            assessment_id: Uuid::new_v4(),
            assessed_at: Utc::now(),
        }];
        let bytes = ExportService::generate_competencies_xlsx(&rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let empty = ExportService::generate_competencies_xlsx(&[]).unwrap();
        assert!(!empty.is_empty());
    }
}
