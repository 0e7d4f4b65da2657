//! Token definitions shared by every profile

use unisym_ast::{Profile, Span};

use crate::raw::RawToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Words ===
    Ident,
    Keyword(Keyword),
    /// Script `#name`
    PrivateName,

    // === Literals ===
    Number,
    String,
    Char,
    /// Template or interpolated string without holes
    Template,
    /// Template text up to and including the first hole opener
    TemplateHead,
    /// Template text between two holes
    TemplateMiddle,
    /// Template text after the last hole, including the closing delimiter
    TemplateTail,
    Regex,

    // === Delimiters ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // === Punctuation ===
    Semicolon,
    Comma,
    Dot,
    Ellipsis,
    Question,
    QuestionDot,
    QuestionQuestion,
    QuestionQuestionEq,
    Colon,
    ColonColon,
    At,
    Hash,

    // === Operators ===
    Eq,
    EqEq,
    EqEqEq,
    Ne,
    NeEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,
    AndAnd,
    OrOr,
    AndAndEq,
    OrOrEq,
    Bang,
    Amp,
    Pipe,
    Caret,
    Tilde,
    AmpEq,
    PipeEq,
    CaretEq,
    Shl,
    ShlEq,
    FatArrow,
    Arrow,

    // === Markup ===
    /// `<` that opens a markup tag (opening or closing)
    TagOpen,
    /// Literal text between markup tags
    MarkupText,

    // === Trivia ===
    Whitespace,
    LineComment,
    BlockComment,
    /// C# preprocessor line
    Directive,

    // === Special ===
    Unknown,
    Eof,
}

impl TokenKind {
    pub(crate) fn from_raw(raw: RawToken) -> TokenKind {
        match raw {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Number => TokenKind::Number,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Question => TokenKind::Question,
            RawToken::QuestionDot => TokenKind::QuestionDot,
            RawToken::QuestionQuestion => TokenKind::QuestionQuestion,
            RawToken::QuestionQuestionEq => TokenKind::QuestionQuestionEq,
            RawToken::Colon => TokenKind::Colon,
            RawToken::ColonColon => TokenKind::ColonColon,
            RawToken::At => TokenKind::At,
            RawToken::Hash => TokenKind::Hash,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::EqEqEq => TokenKind::EqEqEq,
            RawToken::Ne => TokenKind::Ne,
            RawToken::NeEq => TokenKind::NeEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Le => TokenKind::Le,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Ge => TokenKind::Ge,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::StarStar => TokenKind::StarStar,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::StarStarEq => TokenKind::StarStarEq,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::AndAndEq => TokenKind::AndAndEq,
            RawToken::OrOrEq => TokenKind::OrOrEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::AmpEq => TokenKind::AmpEq,
            RawToken::PipeEq => TokenKind::PipeEq,
            RawToken::CaretEq => TokenKind::CaretEq,
            RawToken::Shl => TokenKind::Shl,
            RawToken::ShlEq => TokenKind::ShlEq,
            RawToken::FatArrow => TokenKind::FatArrow,
            RawToken::Arrow => TokenKind::Arrow,
        }
    }

    /// Whitespace, comments and directives; skipped by parsers
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Directive
        )
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::StarStarEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::ShlEq
                | TokenKind::AndAndEq
                | TokenKind::OrOrEq
                | TokenKind::QuestionQuestionEq
        )
    }

    /// Whether an expression operand is expected after this token.
    ///
    /// Decides `/` (regex or division) and `<` (markup or less-than) in
    /// script profiles.
    pub(crate) fn expects_operand(&self) -> bool {
        match self {
            TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::QuestionQuestion
            | TokenKind::EqEq
            | TokenKind::EqEqEq
            | TokenKind::Ne
            | TokenKind::NeEq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Ge
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::StarStar
            | TokenKind::AndAnd
            | TokenKind::OrOr
            | TokenKind::Bang
            | TokenKind::Amp
            | TokenKind::Pipe
            | TokenKind::Caret
            | TokenKind::Tilde
            | TokenKind::FatArrow
            | TokenKind::TemplateHead
            | TokenKind::TemplateMiddle
            | TokenKind::MarkupText => true,
            TokenKind::Keyword(kw) => kw.precedes_operand(),
            kind => kind.is_assignment_operator(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::PrivateName => "private name",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Char => "character literal",
            TokenKind::Template => "template literal",
            TokenKind::TemplateHead => "template head",
            TokenKind::TemplateMiddle => "template middle",
            TokenKind::TemplateTail => "template tail",
            TokenKind::Regex => "regular expression",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Question => "'?'",
            TokenKind::QuestionDot => "'?.'",
            TokenKind::QuestionQuestion => "'??'",
            TokenKind::QuestionQuestionEq => "'??='",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::At => "'@'",
            TokenKind::Hash => "'#'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::EqEqEq => "'==='",
            TokenKind::Ne => "'!='",
            TokenKind::NeEq => "'!=='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::StarStar => "'**'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::StarStarEq => "'**='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::AndAndEq => "'&&='",
            TokenKind::OrOrEq => "'||='",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::AmpEq => "'&='",
            TokenKind::PipeEq => "'|='",
            TokenKind::CaretEq => "'^='",
            TokenKind::Shl => "'<<'",
            TokenKind::ShlEq => "'<<='",
            TokenKind::FatArrow => "'=>'",
            TokenKind::Arrow => "'->'",
            TokenKind::TagOpen => "markup tag",
            TokenKind::MarkupText => "markup text",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Directive => "preprocessor directive",
            TokenKind::Unknown => "unrecognized input",
            TokenKind::Eof => "end of file",
        }
    }
}

/// Reserved words. Contextual words (`get`, `type`, `async`, ...) stay
/// identifiers and are matched by text in the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Shared
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Else,
    Enum,
    False,
    Finally,
    For,
    If,
    In,
    Interface,
    New,
    Null,
    Private,
    Protected,
    Public,
    Return,
    Static,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Void,
    While,

    // Script only
    Debugger,
    Delete,
    Export,
    Extends,
    Function,
    Implements,
    Import,
    Instanceof,
    Let,
    Package,
    Super,
    Var,
    With,
    Yield,

    // C# only
    Abstract,
    As,
    Base,
    Checked,
    Delegate,
    Event,
    Explicit,
    Extern,
    Fixed,
    Foreach,
    Goto,
    Implicit,
    Internal,
    Is,
    Lock,
    Namespace,
    Operator,
    Out,
    Override,
    Params,
    Readonly,
    Ref,
    Sealed,
    Sizeof,
    Stackalloc,
    Struct,
    Unchecked,
    Unsafe,
    Using,
    Virtual,
    Volatile,

    // C# predefined types
    Bool,
    Byte,
    Sbyte,
    CharType,
    Decimal,
    Double,
    Float,
    Int,
    Uint,
    Long,
    Ulong,
    Short,
    Ushort,
    Object,
    StringType,
}

impl Keyword {
    /// Classify `word` under `profile`
    pub fn lookup(word: &str, profile: Profile) -> Option<Keyword> {
        if profile.is_script() {
            Keyword::script(word)
        } else {
            Keyword::csharp(word)
        }
    }

    fn shared(word: &str) -> Option<Keyword> {
        Some(match word {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "catch" => Keyword::Catch,
            "class" => Keyword::Class,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "do" => Keyword::Do,
            "else" => Keyword::Else,
            "enum" => Keyword::Enum,
            "false" => Keyword::False,
            "finally" => Keyword::Finally,
            "for" => Keyword::For,
            "if" => Keyword::If,
            "in" => Keyword::In,
            "interface" => Keyword::Interface,
            "new" => Keyword::New,
            "null" => Keyword::Null,
            "private" => Keyword::Private,
            "protected" => Keyword::Protected,
            "public" => Keyword::Public,
            "return" => Keyword::Return,
            "static" => Keyword::Static,
            "switch" => Keyword::Switch,
            "this" => Keyword::This,
            "throw" => Keyword::Throw,
            "true" => Keyword::True,
            "try" => Keyword::Try,
            "typeof" => Keyword::Typeof,
            "void" => Keyword::Void,
            "while" => Keyword::While,
            _ => return None,
        })
    }

    fn script(word: &str) -> Option<Keyword> {
        Keyword::shared(word).or_else(|| {
            Some(match word {
                "debugger" => Keyword::Debugger,
                "delete" => Keyword::Delete,
                "export" => Keyword::Export,
                "extends" => Keyword::Extends,
                "function" => Keyword::Function,
                "implements" => Keyword::Implements,
                "import" => Keyword::Import,
                "instanceof" => Keyword::Instanceof,
                "let" => Keyword::Let,
                "package" => Keyword::Package,
                "super" => Keyword::Super,
                "var" => Keyword::Var,
                "with" => Keyword::With,
                "yield" => Keyword::Yield,
                _ => return None,
            })
        })
    }

    fn csharp(word: &str) -> Option<Keyword> {
        Keyword::shared(word).or_else(|| {
            Some(match word {
                "abstract" => Keyword::Abstract,
                "as" => Keyword::As,
                "base" => Keyword::Base,
                "checked" => Keyword::Checked,
                "delegate" => Keyword::Delegate,
                "event" => Keyword::Event,
                "explicit" => Keyword::Explicit,
                "extern" => Keyword::Extern,
                "fixed" => Keyword::Fixed,
                "foreach" => Keyword::Foreach,
                "goto" => Keyword::Goto,
                "implicit" => Keyword::Implicit,
                "internal" => Keyword::Internal,
                "is" => Keyword::Is,
                "lock" => Keyword::Lock,
                "namespace" => Keyword::Namespace,
                "operator" => Keyword::Operator,
                "out" => Keyword::Out,
                "override" => Keyword::Override,
                "params" => Keyword::Params,
                "readonly" => Keyword::Readonly,
                "ref" => Keyword::Ref,
                "sealed" => Keyword::Sealed,
                "sizeof" => Keyword::Sizeof,
                "stackalloc" => Keyword::Stackalloc,
                "struct" => Keyword::Struct,
                "unchecked" => Keyword::Unchecked,
                "unsafe" => Keyword::Unsafe,
                "using" => Keyword::Using,
                "virtual" => Keyword::Virtual,
                "volatile" => Keyword::Volatile,
                "bool" => Keyword::Bool,
                "byte" => Keyword::Byte,
                "sbyte" => Keyword::Sbyte,
                "char" => Keyword::CharType,
                "decimal" => Keyword::Decimal,
                "double" => Keyword::Double,
                "float" => Keyword::Float,
                "int" => Keyword::Int,
                "uint" => Keyword::Uint,
                "long" => Keyword::Long,
                "ulong" => Keyword::Ulong,
                "short" => Keyword::Short,
                "ushort" => Keyword::Ushort,
                "object" => Keyword::Object,
                "string" => Keyword::StringType,
                _ => return None,
            })
        })
    }

    /// C# built-in type names (`int`, `string`, ...), including `void`
    pub fn is_predefined_type(&self) -> bool {
        matches!(
            self,
            Keyword::Bool
                | Keyword::Byte
                | Keyword::Sbyte
                | Keyword::CharType
                | Keyword::Decimal
                | Keyword::Double
                | Keyword::Float
                | Keyword::Int
                | Keyword::Uint
                | Keyword::Long
                | Keyword::Ulong
                | Keyword::Short
                | Keyword::Ushort
                | Keyword::Object
                | Keyword::StringType
                | Keyword::Void
        )
    }

    /// Keywords that can stand in modifier position before a declaration
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Keyword::Public
                | Keyword::Private
                | Keyword::Protected
                | Keyword::Internal
                | Keyword::Static
                | Keyword::Readonly
                | Keyword::Abstract
                | Keyword::Override
                | Keyword::Virtual
                | Keyword::Sealed
                | Keyword::Const
                | Keyword::Extern
                | Keyword::Unsafe
                | Keyword::Volatile
                | Keyword::Fixed
                | Keyword::New
                | Keyword::Export
                | Keyword::Default
        )
    }

    fn precedes_operand(&self) -> bool {
        matches!(
            self,
            Keyword::Return
                | Keyword::Typeof
                | Keyword::Case
                | Keyword::Do
                | Keyword::Else
                | Keyword::In
                | Keyword::Instanceof
                | Keyword::New
                | Keyword::Delete
                | Keyword::Void
                | Keyword::Throw
                | Keyword::Yield
                | Keyword::Default
                | Keyword::Extends
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::If => "if",
            Keyword::In => "in",
            Keyword::Interface => "interface",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Private => "private",
            Keyword::Protected => "protected",
            Keyword::Public => "public",
            Keyword::Return => "return",
            Keyword::Static => "static",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::Debugger => "debugger",
            Keyword::Delete => "delete",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::Function => "function",
            Keyword::Implements => "implements",
            Keyword::Import => "import",
            Keyword::Instanceof => "instanceof",
            Keyword::Let => "let",
            Keyword::Package => "package",
            Keyword::Super => "super",
            Keyword::Var => "var",
            Keyword::With => "with",
            Keyword::Yield => "yield",
            Keyword::Abstract => "abstract",
            Keyword::As => "as",
            Keyword::Base => "base",
            Keyword::Checked => "checked",
            Keyword::Delegate => "delegate",
            Keyword::Event => "event",
            Keyword::Explicit => "explicit",
            Keyword::Extern => "extern",
            Keyword::Fixed => "fixed",
            Keyword::Foreach => "foreach",
            Keyword::Goto => "goto",
            Keyword::Implicit => "implicit",
            Keyword::Internal => "internal",
            Keyword::Is => "is",
            Keyword::Lock => "lock",
            Keyword::Namespace => "namespace",
            Keyword::Operator => "operator",
            Keyword::Out => "out",
            Keyword::Override => "override",
            Keyword::Params => "params",
            Keyword::Readonly => "readonly",
            Keyword::Ref => "ref",
            Keyword::Sealed => "sealed",
            Keyword::Sizeof => "sizeof",
            Keyword::Stackalloc => "stackalloc",
            Keyword::Struct => "struct",
            Keyword::Unchecked => "unchecked",
            Keyword::Unsafe => "unsafe",
            Keyword::Using => "using",
            Keyword::Virtual => "virtual",
            Keyword::Volatile => "volatile",
            Keyword::Bool => "bool",
            Keyword::Byte => "byte",
            Keyword::Sbyte => "sbyte",
            Keyword::CharType => "char",
            Keyword::Decimal => "decimal",
            Keyword::Double => "double",
            Keyword::Float => "float",
            Keyword::Int => "int",
            Keyword::Uint => "uint",
            Keyword::Long => "long",
            Keyword::Ulong => "ulong",
            Keyword::Short => "short",
            Keyword::Ushort => "ushort",
            Keyword::Object => "object",
            Keyword::StringType => "string",
        }
    }
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}
