//! Heading-bounded section model of a document body.
//!
//! Splits body text into a tree of [`Section`]s whose spans match the
//! boundary semantics of the downstream chunk splitter: a section runs from
//! just after its own heading line to just before the next heading of equal
//! or shallower level, so its measured size **includes** all descendant
//! text. That is exactly what gets embedded as one chunk unless the
//! splitter falls back to a deeper heading level.
//!
//! Heading detection is fence-aware: a `#` line inside a fenced code block
//! is never a chunk boundary downstream, so it is not a heading here.

/// A heading line in document order, any level, outside code fences.
#[derive(Debug, Clone)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    /// 1-based line number within the body.
    pub line: usize,
    /// Byte offset of the start of the heading line.
    pub offset: usize,
}

/// A fenced code block found in the body.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Lines between the opening and closing fence.
    pub line_count: usize,
    /// Byte offset of the opening fence line.
    pub offset: usize,
    /// 1-based body line of the opening fence.
    pub line: usize,
    /// Lines between the nearest preceding heading and the opening fence.
    pub heading_distance: usize,
    /// True if at least one non-blank, non-fence prose line sits between
    /// the nearest preceding heading and the opening fence.
    pub has_leading_prose: bool,
}

/// A node in the section tree (heading level 2 and deeper).
#[derive(Debug, Clone)]
pub struct Section {
    pub level: u8,
    pub heading: String,
    /// 1-based body line of the heading.
    pub heading_line: usize,
    /// Byte offset of the heading line itself.
    pub heading_offset: usize,
    /// Byte offset just after the heading line.
    pub span_start: usize,
    /// Byte offset just before the next heading of level <= own level.
    pub span_end: usize,
    /// First non-blank, non-heading line after the heading, trimmed.
    pub opening_text: Option<String>,
    pub code_blocks: Vec<CodeBlock>,
    pub children: Vec<Section>,
}

impl Section {
    /// Effective length in characters: the full span including descendant
    /// sections, mirroring the downstream splitter.
    pub fn effective_length(&self) -> usize {
        self.span_end.saturating_sub(self.span_start)
    }

    /// End of the section's own text, before the first child heading.
    pub fn direct_span_end(&self) -> usize {
        self.children
            .first()
            .map(|c| c.heading_offset)
            .unwrap_or(self.span_end)
    }

    /// The section's own text, excluding descendant sections.
    pub fn direct_text<'a>(&self, body: &'a str) -> &'a str {
        &body[self.span_start..self.direct_span_end()]
    }

    /// Total number of descendant sections.
    pub fn subsection_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.subsection_count())
            .sum()
    }

    /// Code blocks in this section and all descendants.
    pub fn total_code_blocks(&self) -> usize {
        self.code_blocks.len()
            + self
                .children
                .iter()
                .map(|c| c.total_code_blocks())
                .sum::<usize>()
    }
}

/// The parsed structural model of one document body.
#[derive(Debug, Clone)]
pub struct SectionModel {
    /// Top-level sections (normally level 2).
    pub roots: Vec<Section>,
    /// Every heading in document order, including level 1.
    pub headings: Vec<Heading>,
    /// Code blocks that precede the first section.
    pub loose_blocks: Vec<CodeBlock>,
    pub body_len: usize,
}

impl SectionModel {
    /// Depth-first iteration over all sections in document order.
    pub fn walk(&self) -> Vec<&Section> {
        let mut out = Vec::new();
        fn visit<'a>(s: &'a Section, out: &mut Vec<&'a Section>) {
            out.push(s);
            for c in &s.children {
                visit(c, out);
            }
        }
        for root in &self.roots {
            visit(root, &mut out);
        }
        out
    }
}

struct Line<'a> {
    start: usize,
    next: usize,
    text: &'a str,
    /// A fence delimiter line (```).
    is_fence: bool,
    /// Inside a fenced block (content lines only, not the delimiters).
    in_fence: bool,
}

fn scan_lines(body: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut pos = 0;
    let mut in_fence = false;
    while pos < body.len() {
        let rest = &body[pos..];
        let (text, next) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], pos + nl + 1),
            None => (rest, body.len()),
        };
        let is_fence = text.trim_start().starts_with("```");
        lines.push(Line {
            start: pos,
            next,
            text,
            is_fence,
            in_fence: in_fence && !is_fence,
        });
        if is_fence {
            in_fence = !in_fence;
        }
        pos = next;
    }
    lines
}

fn parse_heading(text: &str) -> Option<(u8, &str)> {
    let hashes = text.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &text[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// Build the section model for a document body.
///
/// Maintains a stack of open sections keyed by level: a heading of level L
/// closes every open section of level >= L at the position just before the
/// heading line, then opens a new section as a child of the stack top.
/// End of input closes everything at end of body. Level-1 headings close
/// sections and appear in [`SectionModel::headings`] but never open one.
pub fn build_sections(body: &str) -> SectionModel {
    let lines = scan_lines(body);

    let mut headings = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.in_fence || line.is_fence {
            continue;
        }
        if let Some((level, text)) = parse_heading(line.text) {
            headings.push(Heading {
                level,
                text: text.to_string(),
                line: idx + 1,
                offset: line.start,
            });
        }
    }

    let mut roots: Vec<Section> = Vec::new();
    let mut stack: Vec<Section> = Vec::new();

    fn close_open(stack: &mut Vec<Section>, roots: &mut Vec<Section>, level: u8, end: usize) {
        while stack.last().map_or(false, |s| s.level >= level) {
            let mut sec = stack.pop().unwrap();
            sec.span_end = end;
            match stack.last_mut() {
                Some(parent) => parent.children.push(sec),
                None => roots.push(sec),
            }
        }
    }

    for h in &headings {
        close_open(&mut stack, &mut roots, h.level, h.offset);
        if h.level >= 2 {
            let span_start = lines[h.line - 1].next;
            stack.push(Section {
                level: h.level,
                heading: h.text.clone(),
                heading_line: h.line,
                heading_offset: h.offset,
                span_start,
                span_end: span_start,
                opening_text: None,
                code_blocks: Vec::new(),
                children: Vec::new(),
            });
        }
    }
    close_open(&mut stack, &mut roots, 0, body.len());

    let blocks = scan_code_blocks(&lines, &headings);

    let mut loose_blocks = Vec::new();
    for block in blocks {
        if !attach_block(&mut roots, block.clone()) {
            loose_blocks.push(block);
        }
    }

    for root in &mut roots {
        fill_opening_text(root, &lines);
    }

    SectionModel {
        roots,
        headings,
        loose_blocks,
        body_len: body.len(),
    }
}

fn scan_code_blocks(lines: &[Line<'_>], headings: &[Heading]) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        if !line.is_fence {
            continue;
        }
        match open {
            None => open = Some(idx),
            Some(start) => {
                blocks.push(make_block(lines, headings, start, idx));
                open = None;
            }
        }
    }
    // An unclosed fence runs to end of body.
    if let Some(start) = open {
        blocks.push(make_block(lines, headings, start, lines.len()));
    }

    blocks
}

fn make_block(lines: &[Line<'_>], headings: &[Heading], start: usize, end: usize) -> CodeBlock {
    let open_line = start + 1; // 1-based

    let preceding = headings.iter().rev().find(|h| h.line < open_line);
    let (heading_line, heading_distance) = match preceding {
        Some(h) => (h.line, open_line - h.line),
        None => (0, open_line),
    };

    // Prose between the nearest heading and the fence: non-blank lines that
    // are neither headings, fences, nor fence content.
    let has_leading_prose = lines[heading_line..start]
        .iter()
        .any(|l| {
            !l.text.trim().is_empty()
                && !l.is_fence
                && !l.in_fence
                && parse_heading(l.text).is_none()
        });

    CodeBlock {
        line_count: end.saturating_sub(start + 1),
        offset: lines[start].start,
        line: open_line,
        heading_distance,
        has_leading_prose,
    }
}

/// Attach a block to the innermost section containing its offset.
/// Returns false if no section contains it.
fn attach_block(sections: &mut [Section], block: CodeBlock) -> bool {
    for sec in sections.iter_mut() {
        if block.offset >= sec.span_start && block.offset < sec.span_end {
            if !attach_block(&mut sec.children, block.clone()) {
                sec.code_blocks.push(block);
            }
            return true;
        }
    }
    false
}

fn fill_opening_text(sec: &mut Section, lines: &[Line<'_>]) {
    for line in &lines[sec.heading_line..] {
        if line.start >= sec.span_end {
            break;
        }
        if line.text.trim().is_empty() {
            continue;
        }
        // Skip nested child headings when looking for the opening sentence.
        if !line.in_fence && !line.is_fence && parse_heading(line.text).is_some() {
            continue;
        }
        sec.opening_text = Some(line.text.trim().to_string());
        break;
    }
    for child in &mut sec.children {
        fill_opening_text(child, lines);
    }
}
