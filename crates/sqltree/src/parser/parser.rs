//! SQL Parser implementation.
//!
//! Every production is a pure function of the token list and a start
//! index: it either returns the node covering the tokens it recognized or a
//! [`ParseError`]. Nothing is consumed, so a caller can try a production at
//! any index and look at `end_index` to continue.

use std::sync::Arc;

use tracing::debug;

use super::error::ParseError;
use crate::ast::{parse_unsigned, NodeKind, SyntaxTree};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::options::ParseOptions;

type Production = fn(&Parser, usize) -> Result<SyntaxTree, ParseError>;

/// SQL Parser.
///
/// Holds the token list of one input. Cloning is cheap; the tokens are
/// shared with every [`SyntaxTree`] the parser produces.
#[derive(Debug, Clone)]
pub struct Parser {
    tokens: Arc<[Token]>,
    options: ParseOptions,
    /// Number of nested parentheses, calls and subqueries entered so far.
    depth: usize,
}

impl Parser {
    /// Tokenizes `input` with the default options.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lex`] if the input cannot be tokenized.
    pub fn new(input: &str) -> Result<Self, ParseError> {
        Self::with_options(input, ParseOptions::default())
    }

    /// Tokenizes `input` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lex`] if the input cannot be tokenized.
    pub fn with_options(input: &str, options: ParseOptions) -> Result<Self, ParseError> {
        Self::from_tokens(tokenize(input), options)
    }

    /// Creates a parser over an existing token list.
    ///
    /// A list that does not end with an end-of-input token gets one
    /// appended after its last token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Lex`] if the list contains an error token and
    /// [`ParseError::EmptyInput`] if it is empty.
    pub fn from_tokens(mut tokens: Vec<Token>, options: ParseOptions) -> Result<Self, ParseError> {
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(ParseError::lex(error));
        }
        let Some(last) = tokens.last() else {
            return Err(ParseError::EmptyInput);
        };
        if !last.is_eof() {
            let column = last.column + last.text.chars().count();
            let eof = Token::new(TokenKind::Eof, "", last.line, column);
            tokens.push(eof);
        }
        Ok(Self {
            tokens: tokens.into(),
            options,
            depth: 0,
        })
    }

    /// The token list, terminated by an end-of-input token.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses the whole input as a query.
    ///
    /// A single trailing `;` is accepted. Any other token after the query
    /// is an error unless [`ParseOptions::allow_trailing_input`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyInput`] if there are no tokens, or a
    /// syntax error describing the first token that does not fit.
    pub fn parse(&self) -> Result<SyntaxTree, ParseError> {
        if self.tokens.len() <= 1 {
            return Err(ParseError::EmptyInput);
        }
        debug!(tokens = self.tokens.len() - 1, "parsing query");
        self.parse_complete()
            .inspect(|query| {
                debug!(
                    arms = query.children().len(),
                    end = query.end_index(),
                    "parsed query"
                );
            })
            .inspect_err(|error| debug!(%error, "query rejected"))
    }

    fn parse_complete(&self) -> Result<SyntaxTree, ParseError> {
        let query = self.parse_query(0)?;
        let mut next = query.end_index() + 1;
        if self.kind_at(next) == TokenKind::Semicolon {
            next += 1;
        }
        if !self.options.allow_trailing_input && !self.token(next).is_eof() {
            return Err(ParseError::unexpected("end of query", self.token(next)));
        }
        Ok(query)
    }

    /// Parses select queries joined by `UNION`.
    ///
    /// # Errors
    ///
    /// Fails if a select query is malformed or `UNION` is not followed by
    /// one.
    pub fn parse_query(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        let first = self.parse_select_query(start)?;
        let mut end = first.end_index();
        let mut arms = vec![first];
        while self.kind_at(end + 1) == TokenKind::Union {
            let union = end + 1;
            if self.token(union + 1).is_eof() {
                return Err(ParseError::syntax(
                    "UNION must be followed by a SELECT query",
                    self.token(union + 1),
                ));
            }
            let arm = self.parse_select_query(union + 1)?;
            end = arm.end_index();
            arms.push(arm);
        }
        Ok(self.node(NodeKind::Query, start, end, arms))
    }

    /// Parses `SELECT ... FROM ...` followed by any joins and the optional
    /// `WHERE`, `GROUP BY`, `HAVING`, `ORDER BY` and `LIMIT` clauses, in
    /// that order.
    ///
    /// # Errors
    ///
    /// Fails if the select list or `FROM` is missing or a present clause is
    /// malformed.
    pub fn parse_select_query(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        let select = self.parse_select(start)?;
        let from = self.parse_from(select.end_index() + 1)?;
        let mut end = from.end_index();
        let mut clauses = vec![select, from];

        while self.kind_at(end + 1).is_join() {
            let join = self.parse_join(end + 1)?;
            end = join.end_index();
            clauses.push(join);
        }

        let optional: [(TokenKind, Production); 5] = [
            (TokenKind::Where, Self::parse_where),
            (TokenKind::GroupBy, Self::parse_group_by),
            (TokenKind::Having, Self::parse_having),
            (TokenKind::OrderBy, Self::parse_order_by),
            (TokenKind::Limit, Self::parse_limit),
        ];
        for (keyword, production) in optional {
            if self.kind_at(end + 1) == keyword {
                let clause = production(self, end + 1)?;
                end = clause.end_index();
                clauses.push(clause);
            }
        }

        Ok(self.node(NodeKind::SelectQuery, start, end, clauses))
    }

    /// Parses `SELECT` and its comma separated fields.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `SELECT` or a field is malformed.
    pub fn parse_select(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.expect(start, TokenKind::Select)?;
        let fields = self.parse_list(start + 1, Self::parse_field)?;
        let end = Self::last_end(&fields, start);
        Ok(self.node(NodeKind::Select, start, end, fields))
    }

    /// Parses an expression with an optional alias.
    ///
    /// # Errors
    ///
    /// Fails if the expression is malformed or `AS` has no name after it.
    pub fn parse_field(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        let expression = self.parse_expression(start)?;
        let mut end = expression.end_index();
        let mut children = vec![expression];
        if let Some(alias) = self.parse_alias(end + 1)? {
            end = alias.end_index();
            children.push(alias);
        }
        Ok(self.node(NodeKind::Field, start, end, children))
    }

    /// Parses `FROM` followed by a source and an optional alias.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `FROM` or the source is malformed.
    pub fn parse_from(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.expect(start, TokenKind::From)?;
        let source = self.parse_source(start + 1)?;
        let mut end = source.end_index();
        let mut children = vec![source];
        if let Some(alias) = self.parse_alias(end + 1)? {
            end = alias.end_index();
            children.push(alias);
        }
        Ok(self.node(NodeKind::From, start, end, children))
    }

    /// Parses a table name (`t`, `s.t` or `s.*`) or a parenthesized
    /// select query.
    ///
    /// # Errors
    ///
    /// Fails on any other token, an unbalanced parenthesis, or a subquery
    /// that does not fill its parentheses.
    pub fn parse_source(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        match self.kind_at(start) {
            TokenKind::Literal => {
                let end = self.qualified_name_end(start, true);
                Ok(self.leaf(NodeKind::Source, start, end))
            }
            TokenKind::LeftParen => {
                let parenthesis = self.parse_parenthesis(start)?;
                let query = self.descend(start)?.parse_select_query(start + 1)?;
                self.expect_closed(&query, &parenthesis, "')' after the subquery")?;
                Ok(self.node(
                    NodeKind::Source,
                    start,
                    parenthesis.end_index(),
                    vec![query],
                ))
            }
            _ => Err(ParseError::unexpected(
                "table name or subquery",
                self.token(start),
            )),
        }
    }

    /// Parses a join keyword, its source, an optional alias and an optional
    /// `ON` condition.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not a join keyword or a part is malformed.
    pub fn parse_join(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if !self.kind_at(start).is_join() {
            return Err(ParseError::unexpected("JOIN", self.token(start)));
        }
        let source = self.parse_source(start + 1)?;
        let mut end = source.end_index();
        let mut children = vec![source];
        if let Some(alias) = self.parse_alias(end + 1)? {
            end = alias.end_index();
            children.push(alias);
        }
        if self.kind_at(end + 1) == TokenKind::On {
            let condition = self.parse_condition(end + 2)?;
            end = condition.end_index();
            children.push(condition);
        }
        Ok(self.node(NodeKind::Join, start, end, children))
    }

    /// Parses `WHERE` and its condition.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `WHERE` or the condition is malformed.
    pub fn parse_where(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.parse_keyword_condition(start, TokenKind::Where, NodeKind::Where)
    }

    /// Parses `HAVING` and its condition.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `HAVING` or the condition is malformed.
    pub fn parse_having(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.parse_keyword_condition(start, TokenKind::Having, NodeKind::Having)
    }

    fn parse_keyword_condition(
        &self,
        start: usize,
        keyword: TokenKind,
        kind: NodeKind,
    ) -> Result<SyntaxTree, ParseError> {
        self.expect(start, keyword)?;
        let condition = self.parse_condition(start + 1)?;
        let end = condition.end_index();
        Ok(self.node(kind, start, end, vec![condition]))
    }

    /// Parses expressions and parenthesized sub-conditions joined by `AND`
    /// and `OR`.
    ///
    /// The connectives become `Operator` children between the terms. A
    /// parenthesized term is a sub-condition unless an operator follows the
    /// closing parenthesis, in which case the term is an expression. A
    /// sub-condition holding a single expression is replaced by that
    /// expression.
    ///
    /// # Errors
    ///
    /// Fails on a malformed term or a connective with nothing after it.
    pub fn parse_condition(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        let (first, mut end) = self.parse_condition_term(start)?;
        let mut children = vec![first];
        while matches!(self.kind_at(end + 1), TokenKind::And | TokenKind::Or) {
            let connective = end + 1;
            if !self.starts_expression(connective + 1) {
                return Err(ParseError::syntax(
                    format!(
                        "incomplete condition: expected an expression after {}",
                        self.kind_at(connective)
                    ),
                    self.token(connective + 1),
                ));
            }
            children.push(self.leaf(NodeKind::Operator, connective, connective));
            let (term, term_end) = self.parse_condition_term(connective + 1)?;
            children.push(term);
            end = term_end;
        }
        Ok(self.node(NodeKind::Condition, start, end, children))
    }

    /// Returns the term and the index of its last token, which is the
    /// closing parenthesis when a sub-condition was flattened.
    fn parse_condition_term(&self, start: usize) -> Result<(SyntaxTree, usize), ParseError> {
        if self.kind_at(start) == TokenKind::LeftParen {
            let parenthesis = self.parse_parenthesis(start)?;
            let close = parenthesis.end_index();
            if self.operator_end(close + 1)?.is_none() {
                let condition = self.descend(start)?.parse_condition(start + 1)?;
                self.expect_closed(&condition, &parenthesis, "')' closing the condition")?;
                let term = condition.into_only_child(&[NodeKind::Expression]);
                return Ok((term, close));
            }
        }
        let expression = self.parse_expression(start)?;
        let end = expression.end_index();
        Ok((expression, end))
    }

    /// Parses operands joined by operators.
    ///
    /// The children alternate operand, operator, operand; there is no
    /// precedence between operators. An operand may carry one leading sign
    /// and may be a literal, a function call, a parenthesized expression, or
    /// after `IN` a parenthesized list of expressions.
    ///
    /// # Errors
    ///
    /// Fails if an operand is missing or malformed, on two consecutive
    /// signs, or on `NOT` without `LIKE`, `BETWEEN` or `IN` after it.
    pub fn parse_expression(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        let mut children = vec![self.parse_signed_operand(start)?];
        loop {
            let index = Self::last_end(&children, start) + 1;
            let Some(operator_end) = self.operator_end(index)? else {
                break;
            };
            children.push(self.leaf(NodeKind::Operator, index, operator_end));
            let operand = if self.kind_at(operator_end) == TokenKind::In {
                self.parse_value_list(operator_end + 1)?
            } else {
                self.parse_signed_operand(operator_end + 1)?
            };
            children.push(operand);
        }
        let end = Self::last_end(&children, start);
        Ok(self.node(NodeKind::Expression, start, end, children))
    }

    /// Parses an aggregate or scalar function call with one argument
    /// expression.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not a function name, `(` is missing, or the
    /// argument does not fill the parentheses.
    pub fn parse_function(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if !self.kind_at(start).is_function() {
            return Err(ParseError::unexpected("function name", self.token(start)));
        }
        self.expect(start + 1, TokenKind::LeftParen)?;
        let parenthesis = self.parse_parenthesis(start + 1)?;
        let argument = self.descend(start)?.parse_expression(start + 2)?;
        self.expect_closed(&argument, &parenthesis, "')' closing the function call")?;
        Ok(self.node(
            NodeKind::Function,
            start,
            parenthesis.end_index(),
            vec![argument],
        ))
    }

    /// Finds the parenthesis matching the `(` at `start`.
    ///
    /// Returns a leaf `Parenthesis` node spanning both parentheses; the
    /// tokens between them are not parsed.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `(` or the input ends first. The error
    /// points at the innermost parenthesis left open.
    pub fn parse_parenthesis(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if self.kind_at(start) != TokenKind::LeftParen {
            return Err(ParseError::unexpected("'('", self.token(start)));
        }
        let mut open = vec![start];
        for index in start + 1..self.tokens.len() {
            match self.kind_at(index) {
                TokenKind::LeftParen => open.push(index),
                TokenKind::RightParen => {
                    open.pop();
                    if open.is_empty() {
                        return Ok(self.leaf(NodeKind::Parenthesis, start, index));
                    }
                }
                TokenKind::Eof => break,
                _ => {}
            }
        }
        let unmatched = open.last().copied().unwrap_or(start);
        Err(ParseError::syntax(
            "unmatched parenthesis: '(' is never closed",
            self.token(unmatched),
        ))
    }

    /// Parses `GROUP BY` and its comma separated columns.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `GROUP BY` or an entry is not a column name.
    pub fn parse_group_by(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.parse_column_list(start, TokenKind::GroupBy, NodeKind::GroupBy)
    }

    /// Parses `ORDER BY` and its comma separated columns, each with an
    /// optional `ASC` or `DESC`.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `ORDER BY` or an entry is not a column name.
    pub fn parse_order_by(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.parse_column_list(start, TokenKind::OrderBy, NodeKind::OrderBy)
    }

    fn parse_column_list(
        &self,
        start: usize,
        keyword: TokenKind,
        kind: NodeKind,
    ) -> Result<SyntaxTree, ParseError> {
        self.expect(start, keyword)?;
        let columns = self.parse_list(start + 1, Self::parse_ordered_column)?;
        let end = Self::last_end(&columns, start);
        Ok(self.node(kind, start, end, columns))
    }

    fn parse_ordered_column(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if self.kind_at(start) != TokenKind::Literal {
            return Err(ParseError::unexpected("column name", self.token(start)));
        }
        let mut end = self.qualified_name_end(start, false);
        let mut children = vec![self.leaf(NodeKind::ColumnName, start, end)];
        if matches!(self.kind_at(end + 1), TokenKind::Asc | TokenKind::Desc) {
            end += 1;
            children.push(self.leaf(NodeKind::Order, end, end));
        }
        Ok(self.node(NodeKind::Field, start, end, children))
    }

    /// Parses `LIMIT n`, `LIMIT n, m` or `LIMIT n OFFSET m`.
    ///
    /// The arguments become `Operand` children in source order; see
    /// [`SyntaxTree::limit`] for their normalized meaning.
    ///
    /// # Errors
    ///
    /// Fails if `start` is not `LIMIT` or an argument is not an unsigned
    /// integer.
    pub fn parse_limit(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        self.expect(start, TokenKind::Limit)?;
        let mut end = start + 1;
        let mut children = vec![self.parse_limit_argument(end)?];
        if matches!(self.kind_at(end + 1), TokenKind::Comma | TokenKind::Offset) {
            end += 2;
            children.push(self.parse_limit_argument(end)?);
        }
        Ok(self.node(NodeKind::Limit, start, end, children))
    }

    fn parse_limit_argument(&self, index: usize) -> Result<SyntaxTree, ParseError> {
        let token = self.token(index);
        if token.kind != TokenKind::Number || parse_unsigned(&token.text).is_none() {
            return Err(ParseError::syntax(
                format!(
                    "malformed LIMIT argument: expected an unsigned integer, found {}",
                    token.describe()
                ),
                token,
            ));
        }
        Ok(self.leaf(NodeKind::Operand, index, index))
    }

    /// Parses `AS name` or a bare name following an expression or source.
    fn parse_alias(&self, start: usize) -> Result<Option<SyntaxTree>, ParseError> {
        match self.kind_at(start) {
            TokenKind::As => {
                if self.kind_at(start + 1) != TokenKind::Literal {
                    return Err(ParseError::unexpected(
                        "alias name after AS",
                        self.token(start + 1),
                    ));
                }
                Ok(Some(self.leaf(NodeKind::Alias, start, start + 1)))
            }
            TokenKind::Literal => Ok(Some(self.leaf(NodeKind::Alias, start, start))),
            _ => Ok(None),
        }
    }

    fn parse_signed_operand(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if !matches!(self.kind_at(start), TokenKind::Plus | TokenKind::Minus) {
            return self.parse_operand(start);
        }
        if matches!(self.kind_at(start + 1), TokenKind::Plus | TokenKind::Minus) {
            return Err(ParseError::syntax(
                "an operand takes at most one sign",
                self.token(start + 1),
            ));
        }
        let operand = self.parse_operand(start + 1)?;
        let end = operand.end_index();
        Ok(self.node(NodeKind::UnaryOperator, start, end, vec![operand]))
    }

    fn parse_operand(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        match self.kind_at(start) {
            TokenKind::Literal => {
                let end = self.qualified_name_end(start, true);
                Ok(self.leaf(NodeKind::Operand, start, end))
            }
            TokenKind::Number
            | TokenKind::String
            | TokenKind::Star
            | TokenKind::Parameter
            | TokenKind::Question => Ok(self.leaf(NodeKind::Operand, start, start)),
            TokenKind::LeftParen => {
                let parenthesis = self.parse_parenthesis(start)?;
                let inner = self.descend(start)?.parse_expression(start + 1)?;
                self.expect_closed(&inner, &parenthesis, "')' closing the expression")?;
                let inner = inner.into_only_child(&[NodeKind::Operand, NodeKind::Function]);
                Ok(self.node(
                    NodeKind::Parenthesis,
                    start,
                    parenthesis.end_index(),
                    vec![inner],
                ))
            }
            kind if kind.is_function() => self.parse_function(start),
            _ => Err(ParseError::unexpected("an operand", self.token(start))),
        }
    }

    /// Parses the `(expr, ...)` list on the right of `IN`.
    fn parse_value_list(&self, start: usize) -> Result<SyntaxTree, ParseError> {
        if self.kind_at(start) != TokenKind::LeftParen {
            return Err(ParseError::unexpected("'(' after IN", self.token(start)));
        }
        let parenthesis = self.parse_parenthesis(start)?;
        let values = self
            .descend(start)?
            .parse_list(start + 1, Self::parse_expression)?;
        let last = Self::last_end(&values, start);
        if last + 1 != parenthesis.end_index() {
            return Err(ParseError::unexpected(
                "',' or ')' in the IN list",
                self.token(last + 1),
            ));
        }
        Ok(self.node(NodeKind::List, start, parenthesis.end_index(), values))
    }

    /// Applies `item` at `start` and again after every comma that follows.
    fn parse_list(&self, start: usize, item: Production) -> Result<Vec<SyntaxTree>, ParseError> {
        let mut items = vec![item(self, start)?];
        loop {
            let next = Self::last_end(&items, start) + 1;
            if self.kind_at(next) != TokenKind::Comma {
                return Ok(items);
            }
            items.push(item(self, next + 1)?);
        }
    }

    /// Returns the index of the last token of the operator starting at
    /// `index`, or `None` if no operator starts there.
    fn operator_end(&self, index: usize) -> Result<Option<usize>, ParseError> {
        match self.kind_at(index) {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Like
            | TokenKind::Between
            | TokenKind::In => Ok(Some(index)),
            TokenKind::Not => match self.kind_at(index + 1) {
                TokenKind::Like | TokenKind::Between | TokenKind::In => Ok(Some(index + 1)),
                _ => Err(ParseError::unexpected(
                    "LIKE, BETWEEN or IN after NOT",
                    self.token(index + 1),
                )),
            },
            _ => Ok(None),
        }
    }

    fn starts_expression(&self, index: usize) -> bool {
        let kind = self.kind_at(index);
        kind.is_function()
            || matches!(
                kind,
                TokenKind::Plus
                    | TokenKind::Minus
                    | TokenKind::Literal
                    | TokenKind::Number
                    | TokenKind::String
                    | TokenKind::Star
                    | TokenKind::Parameter
                    | TokenKind::Question
                    | TokenKind::LeftParen
            )
    }

    /// Returns the end of `name`, `name.name` or, with `allow_star`,
    /// `name.*` starting at `start`.
    fn qualified_name_end(&self, start: usize, allow_star: bool) -> usize {
        let member = self.kind_at(start + 2);
        let qualified = self.kind_at(start + 1) == TokenKind::Dot
            && (member == TokenKind::Literal || (allow_star && member == TokenKind::Star));
        if qualified {
            start + 2
        } else {
            start
        }
    }

    /// Checks that `inner` ends right before the closing parenthesis.
    fn expect_closed(
        &self,
        inner: &SyntaxTree,
        parenthesis: &SyntaxTree,
        expected: &str,
    ) -> Result<(), ParseError> {
        let next = inner.end_index() + 1;
        if next == parenthesis.end_index() {
            Ok(())
        } else {
            Err(ParseError::unexpected(expected, self.token(next)))
        }
    }

    /// Returns a parser one nesting level deeper.
    fn descend(&self, at: usize) -> Result<Self, ParseError> {
        if self.depth >= self.options.max_depth {
            let token = self.token(at);
            return Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
                line: token.line,
                column: token.column,
            });
        }
        Ok(Self {
            tokens: Arc::clone(&self.tokens),
            options: self.options,
            depth: self.depth + 1,
        })
    }

    fn expect(&self, index: usize, kind: TokenKind) -> Result<(), ParseError> {
        if self.kind_at(index) == kind {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("'{kind}'"),
                self.token(index),
            ))
        }
    }

    /// Returns the token at `index`, or the end-of-input token past the end.
    fn token(&self, index: usize) -> &Token {
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    fn kind_at(&self, index: usize) -> TokenKind {
        self.token(index).kind
    }

    fn last_end(nodes: &[SyntaxTree], fallback: usize) -> usize {
        nodes.last().map_or(fallback, SyntaxTree::end_index)
    }

    fn node(
        &self,
        kind: NodeKind,
        start: usize,
        end: usize,
        children: Vec<SyntaxTree>,
    ) -> SyntaxTree {
        SyntaxTree::new(kind, &self.tokens, start, end, children)
    }

    fn leaf(&self, kind: NodeKind, start: usize, end: usize) -> SyntaxTree {
        SyntaxTree::leaf(kind, &self.tokens, start, end)
    }
}
