// ==========================================
// 班级体测薄弱项分析系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 来源: 上传内容（字节）或本地文件
// 约定: 第一个工作表，首行为表头，完全空白的行跳过
// ==========================================

use crate::domain::dataset::Dataset;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// 体测文件解析接口
pub trait FileParser {
    /// 解析文件内容
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Dataset>;

    /// 解析本地文件
    fn parse_path(&self, path: &Path) -> ImportResult<Dataset> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Dataset> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches(UTF8_BOM).trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row_map = to_row_map(&headers, record.iter().map(str::to_string));

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(Dataset::from_raw_records(headers, records))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Dataset> {
        // 自动识别 xlsx / xls
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::MissingHeader)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let row_map = to_row_map(&headers, data_row.iter().map(|cell| cell.to_string()));

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(Dataset::from_raw_records(headers, records))
    }
}

/// 表头与单元格按位置组合（空表头列丢弃）
fn to_row_map<I>(headers: &[String], cells: I) -> HashMap<String, String>
where
    I: Iterator<Item = String>,
{
    let mut row_map = HashMap::new();
    for (col_idx, value) in cells.enumerate() {
        if let Some(header) = headers.get(col_idx).filter(|h| !h.is_empty()) {
            row_map.insert(header.clone(), value.trim().to_string());
        }
    }
    row_map
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 解析本地文件
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Dataset> {
        let path = file_path.as_ref();
        match file_extension(path).as_str() {
            "csv" => CsvParser.parse_path(path),
            "xlsx" | "xls" => ExcelParser.parse_path(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 解析上传内容（扩展名取自文件名）
    pub fn parse_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Dataset> {
        match file_extension(Path::new(file_name)).as_str() {
            "csv" => CsvParser.parse_bytes(bytes),
            "xlsx" | "xls" => ExcelParser.parse_bytes(bytes),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// 是否为支持的体测文件
    pub fn is_supported(path: &Path) -> bool {
        matches!(file_extension(path).as_str(), "csv" | "xlsx" | "xls")
    }
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_bytes() {
        let content = "\u{feff}学号,姓名,50米跑等级\nS01,张三,优秀\nS02,李四,及格\n";

        let dataset = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns()[0], "学号");
        assert!(dataset.has_column("50米跑等级"));
        assert_eq!(dataset.rows()[1].get("50米跑等级"), Some("及格"));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let content = "学号,50米跑等级\nS01,优秀\n,\nS02,良好\n";
        let dataset = CsvParser.parse_bytes(content.as_bytes()).unwrap();

        // 应跳过空行
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_csv_parser_short_rows_leave_cells_missing() {
        let content = "学号,姓名,50米跑等级\nS01,张三\n";
        let dataset = CsvParser.parse_bytes(content.as_bytes()).unwrap();
        assert_eq!(dataset.rows()[0].get("50米跑等级"), None);
    }

    #[test]
    fn test_csv_parser_from_path() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "姓名,体重等级").unwrap();
        writeln!(temp_file, "王五,超重").unwrap();

        let dataset = UniversalFileParser.parse(temp_file.path()).unwrap();
        assert_eq!(dataset.rows()[0].get("体重等级"), Some("超重"));
    }

    #[test]
    fn test_file_not_found() {
        let result = UniversalFileParser.parse("non_existent.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let result = UniversalFileParser.parse_upload("data.pdf", b"%PDF");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_excel_bytes() {
        let result = UniversalFileParser.parse_upload("一年级1班.xlsx", b"not a workbook");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_csv_has_no_header() {
        let result = CsvParser.parse_bytes(b"");
        assert!(matches!(result, Err(ImportError::MissingHeader)));
    }
}
