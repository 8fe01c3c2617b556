//! ERB grammar rules: leaf tags and compound constructs.
//!
//! Compound constructs nest their chain: `<% if %> … <% else %> … <% end %>`
//! parses as `ERB_IF [tag, stmts…, ERB_ELSE [tag, stmts…, ERB_END]]`. Each
//! chain member therefore has one uniform shape - its own statements, then
//! an optional successor, then an optional terminator - and the innermost
//! member owns the `end` tag.

use crate::defect::DefectKind;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::tags::{self, TagRole};

use super::{Ctx, node};

/// Which successors the enclosing construct currently accepts.
///
/// Ruby's chain grammar is positional: `else` ends an `if` chain but can
/// still be followed by `ensure` in a `begin` chain, `when` repeats, and so
/// on. One state per position keeps the transition table in a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainState {
    /// After `if`/`unless`/`elsif`: accepts `elsif` and `else`.
    If,
    /// After an `if` chain's `else`: accepts only `end`.
    IfElse,
    /// After `case` or `when`: accepts `when` and `else`.
    Case,
    /// After a `case` chain's `else`: accepts only `end`.
    CaseElse,
    /// After `begin` or `rescue`: accepts `rescue`, `else`, `ensure`.
    Begin,
    /// After a `begin` chain's `else`: accepts only `ensure`.
    BeginElse,
    /// After `ensure`, and for loops and iterator blocks: accepts only `end`.
    Terminal,
}

fn successor(state: ChainState, role: TagRole) -> Option<(SyntaxKind, ChainState)> {
    match (state, role) {
        (ChainState::If, TagRole::Elsif) => Some((SyntaxKind::ERB_ELSE, ChainState::If)),
        (ChainState::If, TagRole::Else) => Some((SyntaxKind::ERB_ELSE, ChainState::IfElse)),
        (ChainState::Case, TagRole::When) => Some((SyntaxKind::ERB_WHEN, ChainState::Case)),
        (ChainState::Case, TagRole::Else) => Some((SyntaxKind::ERB_ELSE, ChainState::CaseElse)),
        (ChainState::Begin, TagRole::Rescue) => Some((SyntaxKind::ERB_RESCUE, ChainState::Begin)),
        (ChainState::Begin, TagRole::Else) => Some((SyntaxKind::ERB_ELSE, ChainState::BeginElse)),
        (ChainState::Begin, TagRole::Ensure)
        | (ChainState::BeginElse, TagRole::Ensure) => {
            Some((SyntaxKind::ERB_ENSURE, ChainState::Terminal))
        }
        _ => None,
    }
}

/// Parse one ERB tag into a leaf node or a compound construct.
pub(crate) fn erb_node(p: &mut Parser<'_, '_>, ctx: &mut Ctx) {
    match tags::classify(p.current_text()) {
        TagRole::Output => leaf(p, SyntaxKind::ERB_OUTPUT),
        TagRole::Comment => leaf(p, SyntaxKind::ERB_COMMENT),
        TagRole::Yield => leaf(p, SyntaxKind::ERB_YIELD),
        TagRole::Plain => leaf(p, SyntaxKind::ERB_CONTENT),
        TagRole::If => construct(p, ctx, SyntaxKind::ERB_IF, ChainState::If),
        TagRole::Case => construct(p, ctx, SyntaxKind::ERB_CASE, ChainState::Case),
        TagRole::Begin => construct(p, ctx, SyntaxKind::ERB_BEGIN, ChainState::Begin),
        TagRole::Loop => construct(p, ctx, SyntaxKind::ERB_LOOP, ChainState::Terminal),
        TagRole::BlockOpener => construct(p, ctx, SyntaxKind::ERB_BLOCK, ChainState::Terminal),
        TagRole::Elsif
        | TagRole::Else
        | TagRole::When
        | TagRole::Rescue
        | TagRole::Ensure
        | TagRole::End => {
            // No enclosing construct wanted this tag.
            let span = p.current_span();
            p.defect(DefectKind::StrayChainTag, span);
            leaf(p, SyntaxKind::ERB_CONTENT);
        }
    }
}

/// Wrap a single tag token as a leaf ERB node.
pub(crate) fn leaf(p: &mut Parser<'_, '_>, kind: SyntaxKind) {
    let m = p.start();
    p.bump();
    m.complete(p, kind);
}

/// Parse a compound construct: opener tag, statements, then either a
/// successor chain member (parsed recursively, owning the rest of the
/// chain) or the `end` terminator.
fn construct(p: &mut Parser<'_, '_>, ctx: &mut Ctx, kind: SyntaxKind, state: ChainState) {
    let open_span = p.current_span();
    let m = p.start();
    p.bump(); // opener tag

    loop {
        if p.at_end() {
            p.defect(DefectKind::UnterminatedConstruct, open_span);
            break;
        }
        if p.at(SyntaxKind::ERB_TAG) {
            let role = tags::classify(p.current_text());
            if role == TagRole::End {
                leaf(p, SyntaxKind::ERB_END);
                break;
            }
            if let Some((succ_kind, succ_state)) = successor(state, role) {
                construct(p, ctx, succ_kind, succ_state);
                break;
            }
            if role.is_chain() {
                // A chain tag this construct cannot accept here, e.g.
                // `when` inside `if`. Degrade it to plain content.
                let span = p.current_span();
                p.defect(DefectKind::StrayChainTag, span);
                leaf(p, SyntaxKind::ERB_CONTENT);
                continue;
            }
        }
        node(p, ctx);
    }

    m.complete(p, kind);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;

    fn top_kinds(input: &str) -> Vec<SyntaxKind> {
        let result = parse(input).unwrap();
        result.root.children().map(|c| c.kind()).collect()
    }

    #[test]
    fn parse_leaf_tags() {
        assert_eq!(
            top_kinds("<% a %><%= b %><%# c %><% yield %>"),
            vec![
                SyntaxKind::ERB_CONTENT,
                SyntaxKind::ERB_OUTPUT,
                SyntaxKind::ERB_COMMENT,
                SyntaxKind::ERB_YIELD,
            ]
        );
    }

    #[test]
    fn if_chain_nests() {
        let result = parse("<% if a %><%= x %><% else %><%= y %><% end %>").unwrap();
        let if_node = result.root.children().next().unwrap();
        assert_eq!(if_node.kind(), SyntaxKind::ERB_IF);

        let kinds: Vec<_> = if_node.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::ERB_OUTPUT, SyntaxKind::ERB_ELSE]);

        let else_node = if_node.children().last().unwrap();
        let kinds: Vec<_> = else_node.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::ERB_OUTPUT, SyntaxKind::ERB_END]);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn elsif_extends_the_chain() {
        let result =
            parse("<% if a %><% elsif b %><% elsif c %><% else %><% end %>").unwrap();
        let if_node = result.root.children().next().unwrap();
        // if -> elsif -> elsif -> else -> end, each nested one level deeper
        let mut depth = 0;
        let mut cursor = if_node;
        while let Some(next) = cursor
            .children()
            .find(|c| c.kind() == SyntaxKind::ERB_ELSE)
        {
            depth += 1;
            cursor = next;
        }
        assert_eq!(depth, 3);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn case_when_chain() {
        let result =
            parse("<% case x %><% when 1 %><%= a %><% when 2 %><%= b %><% end %>").unwrap();
        let case_node = result.root.children().next().unwrap();
        assert_eq!(case_node.kind(), SyntaxKind::ERB_CASE);
        let when1 = case_node
            .children()
            .find(|c| c.kind() == SyntaxKind::ERB_WHEN)
            .unwrap();
        let when2 = when1
            .children()
            .find(|c| c.kind() == SyntaxKind::ERB_WHEN)
            .unwrap();
        assert!(
            when2
                .children()
                .any(|c| c.kind() == SyntaxKind::ERB_END)
        );
    }

    #[test]
    fn begin_rescue_ensure_chain() {
        let result = parse("<% begin %><%= a %><% rescue => e %><%= b %><% ensure %><% end %>")
            .unwrap();
        let begin = result.root.children().next().unwrap();
        assert_eq!(begin.kind(), SyntaxKind::ERB_BEGIN);
        let rescue = begin
            .children()
            .find(|c| c.kind() == SyntaxKind::ERB_RESCUE)
            .unwrap();
        let ensure = rescue
            .children()
            .find(|c| c.kind() == SyntaxKind::ERB_ENSURE)
            .unwrap();
        assert!(ensure.children().any(|c| c.kind() == SyntaxKind::ERB_END));
    }

    #[test]
    fn loop_and_block_constructs() {
        assert_eq!(
            top_kinds("<% for x in xs %><% end %><% xs.each do |x| %><% end %>"),
            vec![SyntaxKind::ERB_LOOP, SyntaxKind::ERB_BLOCK]
        );
    }

    #[test]
    fn stray_end_degrades_to_content() {
        let result = parse("<% end %>").unwrap();
        assert_eq!(
            result.root.children().next().unwrap().kind(),
            SyntaxKind::ERB_CONTENT
        );
        assert_eq!(result.defects.len(), 1);
    }

    #[test]
    fn unterminated_if_reports_defect() {
        let result = parse("<% if a %><%= x %>").unwrap();
        let if_node = result.root.children().next().unwrap();
        assert_eq!(if_node.kind(), SyntaxKind::ERB_IF);
        assert_eq!(result.defects.len(), 1);
        assert_eq!(result.root.text().to_string(), "<% if a %><%= x %>");
    }

    #[test]
    fn when_inside_if_is_stray() {
        let result = parse("<% if a %><% when 1 %><% end %>").unwrap();
        assert_eq!(result.defects.len(), 1);
        // the tree still terminates the if
        let if_node = result.root.children().next().unwrap();
        assert!(if_node.children().any(|c| c.kind() == SyntaxKind::ERB_END));
    }
}
