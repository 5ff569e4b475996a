use std::collections::BTreeMap;

use lopdf::{content::Content, Document, Object, ObjectId};

use crate::model::WordSpan;

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub size: f64,
}

impl TextRun {
    pub fn words(&self) -> impl Iterator<Item = WordSpan> + '_ {
        self.text
            .split_whitespace()
            .map(move |word| WordSpan::new(word, self.size))
    }
}

/// Affine matrix `[a b c d e f]` as used by `cm` and `Tm`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn from_operands(operands: &[Object]) -> Option<Matrix> {
        if operands.len() != 6 {
            return None;
        }
        let mut m = [0.0; 6];
        for (slot, obj) in m.iter_mut().zip(operands) {
            *slot = as_number(obj)?;
        }
        Some(Matrix(m))
    }

    // self × other
    fn then(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn translate(tx: f64, ty: f64) -> Matrix {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    // Length of the transformed unit y vector: how tall one text-space unit renders.
    fn vertical_scale(&self) -> f64 {
        let [_, _, c, d, _, _] = self.0;
        c.hypot(d)
    }
}

// Extract text runs with their rendered font size from one page's content stream
pub fn extract_runs(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<TextRun>> {
    let content_data = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_data)?;
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    Ok(runs_from_content(&content, &encodings))
}

pub fn extract_words(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<WordSpan>> {
    let runs = extract_runs(doc, page_id)?;
    Ok(runs.iter().flat_map(TextRun::words).collect())
}

/// `encodings` maps font resource names to their encoding names, as lopdf's
/// own text extraction does.
pub fn runs_from_content(content: &Content, encodings: &BTreeMap<Vec<u8>, &str>) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut font_size = 12.0_f64;
    let mut encoding: Option<&str> = None;
    let mut ctm = Matrix::IDENTITY;
    let mut ctm_stack = Vec::new();
    let mut text_matrix = Matrix::IDENTITY;
    let mut line_matrix = Matrix::IDENTITY;
    let mut leading = 0.0_f64;

    for op in &content.operations {
        let operands = &op.operands;
        let text = match op.operator.as_str() {
            "q" => {
                ctm_stack.push(ctm);
                continue;
            }
            "Q" => {
                ctm = ctm_stack.pop().unwrap_or(Matrix::IDENTITY);
                continue;
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    ctm = m.then(&ctm);
                }
                continue;
            }
            "BT" => {
                text_matrix = Matrix::IDENTITY;
                line_matrix = Matrix::IDENTITY;
                continue;
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    text_matrix = m;
                    line_matrix = m;
                }
                continue;
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(as_number),
                    operands.get(1).and_then(as_number),
                ) {
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                    line_matrix = Matrix::translate(tx, ty).then(&line_matrix);
                    text_matrix = line_matrix;
                }
                continue;
            }
            "TL" => {
                if let Some(tl) = operands.first().and_then(as_number) {
                    leading = tl;
                }
                continue;
            }
            "T*" => {
                line_matrix = Matrix::translate(0.0, -leading).then(&line_matrix);
                text_matrix = line_matrix;
                continue;
            }
            "Tf" => {
                // "Tf" has operands: font-name, font-size
                if let Some(Object::Name(name)) = operands.first() {
                    encoding = encodings.get(name).copied();
                }
                if let Some(size) = operands.get(1).and_then(as_number) {
                    font_size = size;
                }
                continue;
            }
            "Tj" => operands.first().and_then(|s| decode_text(s, encoding)),
            "'" => {
                line_matrix = Matrix::translate(0.0, -leading).then(&line_matrix);
                text_matrix = line_matrix;
                operands.first().and_then(|s| decode_text(s, encoding))
            }
            // '"' carries word and char spacing ahead of the string
            "\"" => {
                line_matrix = Matrix::translate(0.0, -leading).then(&line_matrix);
                text_matrix = line_matrix;
                operands.get(2).and_then(|s| decode_text(s, encoding))
            }
            "TJ" => match operands.first() {
                Some(Object::Array(items)) => Some(
                    items
                        .iter()
                        .filter_map(|s| decode_text(s, encoding))
                        .collect(),
                ),
                _ => None,
            },
            _ => None,
        };

        if let Some(text) = text {
            if !text.trim().is_empty() {
                let scale = text_matrix.then(&ctm).vertical_scale();
                runs.push(TextRun {
                    text,
                    size: (font_size * scale).abs(),
                });
            }
        }
    }

    runs
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Real(r) => Some(*r as f64),
        Object::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn decode_text(obj: &Object, encoding: Option<&str>) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(match encoding {
            Some(encoding) => Document::decode_text(Some(encoding), bytes),
            None => String::from_utf8_lossy(bytes).to_string(),
        }),
        _ => None,
    }
}
