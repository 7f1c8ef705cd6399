//! Query options: system query options, parameter aliases and custom options.

use serde::Serialize;

use super::expr::{BoolCommonExpr, CommonExpr};
use super::json::ArrayOrObject;
use super::literal::BooleanValue;
use super::names::*;
use super::punct::{Bws, Close, Comma, Open, QuotationMark, Rws, Semi, Star};
use super::resource::{ComplexCast, Count, EntityCast, ParameterAlias, ParameterName, Ref};
use super::{Chain, List, Prefixed, Suffixed, Syntax, Token};

identifier! {
    /// `computedProperty = odataIdentifier`
    ComputedProperty,
}

lexical! {
    /// `searchWord = 1*( ALPHA / DIGIT / COMMA / "." / pct-encoded )`
    SearchWord,
    /// `customName = qchar-no-AMP-EQ-AT-DOLLAR *( qchar-no-AMP-EQ )`
    CustomName,
}

/// `queryOptions = queryOption *( "&" queryOption )`
pub type QueryOptions<'a> = List<Token<'a>, QueryOption<'a>>;
/// `batchOptions = batchOption *( "&" batchOption )`
pub type BatchOptions<'a> = List<Token<'a>, BatchOption<'a>>;
/// `metadataOptions = metadataOption *( "&" metadataOption )`
pub type MetadataOptions<'a> = List<Token<'a>, MetadataOption<'a>>;

/// `batchOption = format / customQueryOption`
pub type BatchOption<'a> = FormatOrCustom<'a>;
/// `metadataOption = format / customQueryOption`
pub type MetadataOption<'a> = FormatOrCustom<'a>;
/// `entityIdOption = format / customQueryOption`
pub type EntityIdOption<'a> = FormatOrCustom<'a>;

/// `entityOptions = *( entityIdOption "&" ) id *( "&" entityIdOption )`
pub type EntityOptions<'a> = IdOptions<'a, EntityIdOption<'a>>;
/// `entityCastOptions = *( entityCastOption "&" ) id *( "&" entityCastOption )`
pub type EntityCastOptions<'a> = IdOptions<'a, EntityCastOption<'a>>;

pub type Id<'a> = SystemOption<'a, Token<'a>>;
pub type Compute<'a> = SystemOption<'a, List<Comma<'a>, ComputeItem<'a>>>;
pub type Expand<'a> = SystemOption<'a, List<Comma<'a>, ExpandItem<'a>>>;
pub type Levels<'a> = SystemOption<'a, LevelsValue<'a>>;
pub type Filter<'a> = SystemOption<'a, BoolCommonExpr<'a>>;
pub type Orderby<'a> = SystemOption<'a, List<Comma<'a>, OrderbyItem<'a>>>;
pub type Skip<'a> = SystemOption<'a, Token<'a>>;
pub type Top<'a> = SystemOption<'a, Token<'a>>;
pub type Index<'a> = SystemOption<'a, Token<'a>>;
pub type Format<'a> = SystemOption<'a, FormatValue<'a>>;
pub type Inlinecount<'a> = SystemOption<'a, BooleanValue<'a>>;
pub type Schemaversion<'a> = SystemOption<'a, SchemaVersionValue<'a>>;
pub type Search<'a> = SystemOption<'a, SearchValue<'a>>;
pub type Select<'a> = SystemOption<'a, List<Comma<'a>, SelectItem<'a>>>;
pub type Deltatoken<'a> = SystemOption<'a, Token<'a>>;
pub type Skiptoken<'a> = SystemOption<'a, Token<'a>>;

/// `qualifiedActionName = namespace "." action`
pub type QualifiedActionName<'a> = Qualified<'a, Action<'a>>;

node! {
    pub enum QueryOption<'a> {
        System(SystemQueryOption<'a>),
        AliasAndValue(AliasAndValue<'a>),
        NameAndValue(NameAndValue<'a>),
        Custom(CustomQueryOption<'a>),
    }

    pub enum FormatOrCustom<'a> {
        Format(Format<'a>),
        Custom(CustomQueryOption<'a>),
    }

    /// `entityCastOption = entityIdOption / expand / select`
    pub enum EntityCastOption<'a> {
        IdOption(EntityIdOption<'a>),
        Expand(Expand<'a>),
        Select(Select<'a>),
    }

    pub enum SystemQueryOption<'a> {
        Compute(Compute<'a>),
        Deltatoken(Deltatoken<'a>),
        Expand(Expand<'a>),
        Filter(Filter<'a>),
        Format(Format<'a>),
        Id(Id<'a>),
        Inlinecount(Inlinecount<'a>),
        Orderby(Orderby<'a>),
        Schemaversion(Schemaversion<'a>),
        Search(Search<'a>),
        Select(Select<'a>),
        Skip(Skip<'a>),
        Skiptoken(Skiptoken<'a>),
        Top(Top<'a>),
        Index(Index<'a>),
    }

    /// `computeItem = commonExpr RWS "as" RWS computedProperty`
    pub struct ComputeItem<'a> {
        pub expression: CommonExpr<'a>,
        pub before: Rws<'a>,
        pub keyword: Token<'a>,
        pub after: Rws<'a>,
        pub property: ComputedProperty<'a>,
    }

    pub enum ExpandItem<'a> {
        Star(ExpandStar<'a>),
        Value(Token<'a>),
        Path(ExpandPathItem<'a>),
    }

    /// `STAR [ ref / OPEN levels CLOSE ]`
    pub struct ExpandStar<'a> {
        pub star: Star<'a>,
        pub tail: Option<ExpandStarTail<'a>>,
    }

    pub enum ExpandStarTail<'a> {
        Ref(Ref<'a>),
        Levels(StarLevels<'a>),
    }

    /// `OPEN levels CLOSE`
    pub struct StarLevels<'a> {
        pub open: Open<'a>,
        pub levels: Levels<'a>,
        pub close: Close<'a>,
    }

    pub struct ExpandPathItem<'a> {
        pub path: ExpandPath<'a>,
        pub tail: Option<ExpandPathTail<'a>>,
    }

    pub enum ExpandPathTail<'a> {
        Ref(Chain<Ref<'a>, OptionList<'a, ExpandRefOption<'a>>>),
        Count(Chain<Count<'a>, OptionList<'a, ExpandCountOption<'a>>>),
        Options(OptionList<'a, ExpandOption<'a>>),
    }

    /// `expandPath`
    pub struct ExpandPath<'a> {
        pub type_cast: Option<Suffixed<'a, EntityOrComplexType<'a>>>,
        pub segments: Vec<ExpandPathSegment<'a>>,
        pub last: ExpandPathEnd<'a>,
    }

    /// `qualifiedEntityTypeName / qualifiedComplexTypeName`
    pub enum EntityOrComplexType<'a> {
        Entity(QualifiedEntityTypeName<'a>),
        Complex(QualifiedComplexTypeName<'a>),
    }

    /// `( complexProperty / complexColProperty ) "/" [ qualifiedComplexTypeName "/" ]`
    pub struct ExpandPathSegment<'a> {
        pub property: ComplexOrColProperty<'a>,
        pub slash: Token<'a>,
        pub cast: Option<Suffixed<'a, QualifiedComplexTypeName<'a>>>,
    }

    pub enum ComplexOrColProperty<'a> {
        Complex(ComplexProperty<'a>),
        ComplexCol(ComplexColProperty<'a>),
    }

    /// `STAR / streamProperty / navigationProperty [ "/" qualifiedEntityTypeName ]`
    pub enum ExpandPathEnd<'a> {
        Star(Star<'a>),
        Navigation(Chain<NavigationProperty<'a>, EntityCast<'a>>),
        Stream(StreamProperty<'a>),
    }

    /// `expandCountOption = filter / search`
    pub enum ExpandCountOption<'a> {
        Filter(Filter<'a>),
        Search(Search<'a>),
    }

    /// `expandRefOption = expandCountOption / orderby / skip / top / inlinecount`
    pub enum ExpandRefOption<'a> {
        Count(ExpandCountOption<'a>),
        Orderby(Orderby<'a>),
        Skip(Skip<'a>),
        Top(Top<'a>),
        Inlinecount(Inlinecount<'a>),
    }

    /// `expandOption = expandRefOption / select / expand / compute / levels / aliasAndValue`
    pub enum ExpandOption<'a> {
        Ref(ExpandRefOption<'a>),
        Select(Box<Select<'a>>),
        Expand(Box<Expand<'a>>),
        Compute(Compute<'a>),
        Levels(Levels<'a>),
        AliasAndValue(AliasAndValue<'a>),
    }

    /// `oneToNine *DIGIT / "max"`
    pub enum LevelsValue<'a> {
        Number(Token<'a>),
        Max(Token<'a>),
    }

    /// `orderbyItem = commonExpr [ RWS ( "asc" / "desc" ) ]`
    pub struct OrderbyItem<'a> {
        pub expression: CommonExpr<'a>,
        pub direction: Option<OrderDirection<'a>>,
    }

    pub struct OrderDirection<'a> {
        pub rws: Rws<'a>,
        pub keyword: Token<'a>,
    }

    pub enum FormatValue<'a> {
        Atom(Token<'a>),
        Json(Token<'a>),
        Xml(Token<'a>),
        /// `1*pchar "/" 1*pchar`
        MediaType(Token<'a>),
    }

    /// `STAR / 1*unreserved`
    pub enum SchemaVersionValue<'a> {
        Star(Star<'a>),
        Version(Token<'a>),
    }

    /// `BWS searchExpr`
    pub struct SearchValue<'a> {
        pub bws: Bws<'a>,
        pub expr: SearchExpr<'a>,
    }

    /// `searchExpr = ( OPEN BWS searchExpr BWS CLOSE / searchTerm ) [ searchOrExpr / searchAndExpr ]`
    pub struct SearchExpr<'a> {
        pub operand: SearchOperand<'a>,
        pub tail: Option<SearchTail<'a>>,
    }

    pub enum SearchOperand<'a> {
        Parenthesized(Box<SearchParens<'a>>),
        Term(SearchTerm<'a>),
    }

    pub struct SearchParens<'a> {
        pub open: Open<'a>,
        pub before: Bws<'a>,
        pub expr: SearchExpr<'a>,
        pub after: Bws<'a>,
        pub close: Close<'a>,
    }

    pub enum SearchTail<'a> {
        Or(SearchOrExpr<'a>),
        And(SearchAndExpr<'a>),
    }

    /// `searchOrExpr = RWS 'OR' RWS searchExpr`
    pub struct SearchOrExpr<'a> {
        pub before: Rws<'a>,
        pub keyword: Token<'a>,
        pub after: Rws<'a>,
        pub expr: Box<SearchExpr<'a>>,
    }

    /// `searchAndExpr = RWS [ 'AND' RWS ] searchExpr`
    pub struct SearchAndExpr<'a> {
        pub before: Rws<'a>,
        pub keyword: Option<SearchKeyword<'a>>,
        pub expr: Box<SearchExpr<'a>>,
    }

    /// `'AND' RWS` or `'NOT' RWS`
    pub struct SearchKeyword<'a> {
        pub keyword: Token<'a>,
        pub rws: Rws<'a>,
    }

    /// `searchTerm = [ 'NOT' RWS ] ( searchPhrase / searchWord )`
    pub struct SearchTerm<'a> {
        pub not: Option<SearchKeyword<'a>>,
        pub value: SearchTermValue<'a>,
    }

    pub enum SearchTermValue<'a> {
        Phrase(SearchPhrase<'a>),
        Word(SearchWord<'a>),
    }

    /// `searchPhrase = quotation-mark 1*qchar-no-AMP-DQUOTE quotation-mark`
    pub struct SearchPhrase<'a> {
        pub open: QuotationMark<'a>,
        pub text: Token<'a>,
        pub close: QuotationMark<'a>,
    }

    pub enum SelectItem<'a> {
        Star(Star<'a>),
        AllOperations(AllOperationsInSchema<'a>),
        Path(SelectPathItem<'a>),
    }

    /// `[ ( qualifiedEntityTypeName / qualifiedComplexTypeName ) "/" ] ( selectProperty / qualifiedActionName / qualifiedFunctionName )`
    pub struct SelectPathItem<'a> {
        pub type_cast: Option<Suffixed<'a, EntityOrComplexType<'a>>>,
        pub target: SelectTarget<'a>,
    }

    pub enum SelectTarget<'a> {
        Action(QualifiedActionName<'a>),
        Function(QualifiedFunctionName<'a>),
        Property(SelectProperty<'a>),
    }

    pub enum SelectProperty<'a> {
        Primitive(PrimitiveProperty<'a>),
        PrimitiveCol(Chain<PrimitiveColProperty<'a>, OptionList<'a, SelectOptionPc<'a>>>),
        Navigation(NavigationProperty<'a>),
        Path(Chain<SelectPath<'a>, SelectPathTail<'a>>),
    }

    pub enum SelectPathTail<'a> {
        Options(OptionList<'a, SelectOption<'a>>),
        Property(Prefixed<'a, Box<SelectProperty<'a>>>),
    }

    /// `selectPath = ( complexProperty / complexColProperty ) [ "/" qualifiedComplexTypeName ]`
    pub struct SelectPath<'a> {
        pub property: ComplexOrColProperty<'a>,
        pub cast: Option<ComplexCast<'a>>,
    }

    /// `selectOptionPC = filter / search / inlinecount / orderby / skip / top`
    pub enum SelectOptionPc<'a> {
        Filter(Filter<'a>),
        Search(Search<'a>),
        Inlinecount(Inlinecount<'a>),
        Orderby(Orderby<'a>),
        Skip(Skip<'a>),
        Top(Top<'a>),
    }

    /// `selectOption = selectOptionPC / compute / select / expand / aliasAndValue`
    pub enum SelectOption<'a> {
        Pc(SelectOptionPc<'a>),
        Compute(Compute<'a>),
        Select(Box<Select<'a>>),
        Expand(Box<Expand<'a>>),
        AliasAndValue(AliasAndValue<'a>),
    }

    /// `allOperationsInSchema = namespace "." STAR`
    pub struct AllOperationsInSchema<'a> {
        pub namespace: Namespace<'a>,
        pub dot: Token<'a>,
        pub star: Star<'a>,
    }

    /// `qualifiedFunctionName = namespace "." function [ OPEN parameterNames CLOSE ]`
    pub struct QualifiedFunctionName<'a> {
        pub name: Qualified<'a, Function<'a>>,
        pub parameters: Option<ParameterNameList<'a>>,
    }

    pub struct ParameterNameList<'a> {
        pub open: Open<'a>,
        pub names: ParameterNames<'a>,
        pub close: Close<'a>,
    }

    /// `parameterNames = parameterName *( COMMA parameterName )`
    pub struct ParameterNames<'a> {
        pub names: List<Comma<'a>, ParameterName<'a>>,
    }

    /// `aliasAndValue = parameterAlias EQ parameterValue`
    pub struct AliasAndValue<'a> {
        pub alias: ParameterAlias<'a>,
        pub eq: Token<'a>,
        pub value: ParameterValue<'a>,
    }

    /// `nameAndValue = parameterName EQ parameterValue`
    pub struct NameAndValue<'a> {
        pub name: ParameterName<'a>,
        pub eq: Token<'a>,
        pub value: ParameterValue<'a>,
    }

    /// `parameterValue = arrayOrObject / commonExpr`
    pub enum ParameterValue<'a> {
        ArrayOrObject(ArrayOrObject<'a>),
        CommonExpr(CommonExpr<'a>),
    }

    /// `customQueryOption = customName [ EQ customValue ]`
    pub struct CustomQueryOption<'a> {
        pub name: CustomName<'a>,
        pub value: Option<CustomValue<'a>>,
    }

    /// `EQ customValue`
    pub struct CustomValue<'a> {
        pub eq: Token<'a>,
        pub value: Token<'a>,
    }
}

/// `( "$name" / "name" ) EQ value`, the shape of every system query option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemOption<'a, T> {
    pub keyword: Token<'a>,
    pub eq: Token<'a>,
    pub value: T,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for SystemOption<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        out.push(self.keyword);
        out.push(self.eq);
        self.value.tokens_into(out);
    }
}

impl<T> SystemOption<'_, T> {
    /// The option name without its `$`, as written.
    pub fn name(&self) -> &str {
        let keyword = self.keyword.text();
        keyword.strip_prefix('$').unwrap_or(keyword)
    }

    pub fn has_dollar(&self) -> bool {
        self.keyword.text().starts_with('$')
    }
}

/// `OPEN option *( SEMI option ) CLOSE`, the nested options of an expand or
/// select item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionList<'a, T> {
    pub open: Open<'a>,
    pub options: List<Semi<'a>, T>,
    pub close: Close<'a>,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for OptionList<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.open.tokens_into(out);
        self.options.tokens_into(out);
        self.close.tokens_into(out);
    }
}

/// `*( option "&" ) id *( "&" option )`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdOptions<'a, T> {
    pub before: Vec<Suffixed<'a, T>>,
    pub id: Id<'a>,
    pub after: Vec<Prefixed<'a, T>>,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for IdOptions<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.before.tokens_into(out);
        self.id.tokens_into(out);
        self.after.tokens_into(out);
    }
}

impl<'a> SystemQueryOption<'a> {
    /// The option name without its `$`.
    pub fn name(&self) -> &'a str {
        let keyword = match self {
            SystemQueryOption::Compute(option) => option.keyword,
            SystemQueryOption::Deltatoken(option)
            | SystemQueryOption::Id(option)
            | SystemQueryOption::Skip(option)
            | SystemQueryOption::Skiptoken(option)
            | SystemQueryOption::Top(option)
            | SystemQueryOption::Index(option) => option.keyword,
            SystemQueryOption::Expand(option) => option.keyword,
            SystemQueryOption::Filter(option) => option.keyword,
            SystemQueryOption::Format(option) => option.keyword,
            SystemQueryOption::Inlinecount(option) => option.keyword,
            SystemQueryOption::Orderby(option) => option.keyword,
            SystemQueryOption::Schemaversion(option) => option.keyword,
            SystemQueryOption::Search(option) => option.keyword,
            SystemQueryOption::Select(option) => option.keyword,
        }
        .text();
        keyword.strip_prefix('$').unwrap_or(keyword)
    }
}

impl<'a> QueryOption<'a> {
    pub fn as_system(&self) -> Option<&SystemQueryOption<'a>> {
        match self {
            QueryOption::System(option) => Some(option),
            _ => None,
        }
    }
}

impl OrderbyItem<'_> {
    pub fn is_descending(&self) -> bool {
        self.direction
            .as_ref()
            .map_or(false, |direction| direction.keyword.text().eq_ignore_ascii_case("desc"))
    }
}

impl SearchPhrase<'_> {
    /// The phrase between its quotation marks.
    pub fn as_str(&self) -> &str {
        self.text.text()
    }
}
