//! Expressions: `$filter`, `$orderby`, `$compute` and parameter values.
//!
//! The tree keeps the right-nested shape of the grammar, in which an operator
//! hangs off the operand before it and takes everything after it as its right
//! side. [`crate::expr`] regroups such a chain by operator precedence.

use serde::Serialize;

use super::json::ArrayOrObject;
use super::literal::{Enum, PrimitiveLiteral};
use super::names::*;
use super::punct::{At, Bws, Close, Colon, Comma, Open, Rws};
use super::query::{ExpandCountOption, OptionList, ParameterValue};
use super::resource::{ComplexCast, Count, EntityCast, KeyPredicate, ParameterAlias, ParameterName};
use super::{Chain, Item, List, Prefixed, Suffixed, Syntax, Token};

identifier! {
    /// `annotationQualifier = odataIdentifier`
    AnnotationQualifier,
    /// `lambdaVariableExpr = odataIdentifier`
    LambdaVariableExpr,
}

/// `boolCommonExpr = commonExpr`
pub type BoolCommonExpr<'a> = CommonExpr<'a>;
/// `lambdaPredicateExpr = boolCommonExpr`
pub type LambdaPredicateExpr<'a> = BoolCommonExpr<'a>;
/// `boundFunctionExpr = functionExpr`
pub type BoundFunctionExpr<'a> = FunctionExpr<'a>;
/// `singleNavigationExpr = "/" memberExpr`
pub type SingleNavigationExpr<'a> = Prefixed<'a, Box<MemberExpr<'a>>>;
/// `annotationExpr = annotation [ collectionPathExpr / singleNavigationExpr / complexPathExpr / primitivePathExpr ]`
pub type AnnotationExpr<'a> = Chain<Annotation<'a>, Box<AnnotationPath<'a>>>;

pub type AndExpr<'a> = OperatorExpr<'a, BoolCommonExpr<'a>>;
pub type OrExpr<'a> = OperatorExpr<'a, BoolCommonExpr<'a>>;
pub type EqExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type NeExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type LtExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type LeExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type GtExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type GeExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type InExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type HasExpr<'a> = OperatorExpr<'a, Enum<'a>>;
pub type AddExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type SubExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type MulExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type DivExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type DivbyExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;
pub type ModExpr<'a> = OperatorExpr<'a, CommonExpr<'a>>;

pub type ConcatMethodCallExpr<'a> = BinaryCall<'a>;
pub type ContainsMethodCallExpr<'a> = BinaryCall<'a>;
pub type EndsWithMethodCallExpr<'a> = BinaryCall<'a>;
pub type IndexOfMethodCallExpr<'a> = BinaryCall<'a>;
pub type LengthMethodCallExpr<'a> = UnaryCall<'a>;
pub type StartsWithMethodCallExpr<'a> = BinaryCall<'a>;
pub type ToLowerMethodCallExpr<'a> = UnaryCall<'a>;
pub type ToUpperMethodCallExpr<'a> = UnaryCall<'a>;
pub type TrimMethodCallExpr<'a> = UnaryCall<'a>;
pub type YearMethodCallExpr<'a> = UnaryCall<'a>;
pub type MonthMethodCallExpr<'a> = UnaryCall<'a>;
pub type DayMethodCallExpr<'a> = UnaryCall<'a>;
pub type HourMethodCallExpr<'a> = UnaryCall<'a>;
pub type MinuteMethodCallExpr<'a> = UnaryCall<'a>;
pub type SecondMethodCallExpr<'a> = UnaryCall<'a>;
pub type FractionalsecondsMethodCallExpr<'a> = UnaryCall<'a>;
pub type TotalsecondsMethodCallExpr<'a> = UnaryCall<'a>;
pub type DateMethodCallExpr<'a> = UnaryCall<'a>;
pub type TimeMethodCallExpr<'a> = UnaryCall<'a>;
pub type TotalOffsetMinutesMethodCallExpr<'a> = UnaryCall<'a>;
pub type MinDateTimeMethodCallExpr<'a> = NullaryCall<'a>;
pub type MaxDateTimeMethodCallExpr<'a> = NullaryCall<'a>;
pub type NowMethodCallExpr<'a> = NullaryCall<'a>;
pub type RoundMethodCallExpr<'a> = UnaryCall<'a>;
pub type FloorMethodCallExpr<'a> = UnaryCall<'a>;
pub type CeilingMethodCallExpr<'a> = UnaryCall<'a>;
pub type DistanceMethodCallExpr<'a> = BinaryCall<'a>;
pub type GeoLengthMethodCallExpr<'a> = UnaryCall<'a>;
pub type IntersectsMethodCallExpr<'a> = BinaryCall<'a>;
pub type HasSubsetMethodCallExpr<'a> = BinaryCall<'a>;
pub type HasSubsequenceMethodCallExpr<'a> = BinaryCall<'a>;

pub type IsofExpr<'a> = TypeExpr<'a>;
pub type CastExpr<'a> = TypeExpr<'a>;

node! {
    /// `commonExpr`: an operand and the operators that follow it.
    pub struct CommonExpr<'a> {
        pub operand: PrimaryExpr<'a>,
        pub arithmetic: Option<ArithmeticExpr<'a>>,
        pub comparison: Option<ComparisonExpr<'a>>,
        pub logical: Option<LogicalExpr<'a>>,
    }

    pub enum PrimaryExpr<'a> {
        Literal(PrimitiveLiteral<'a>),
        ArrayOrObject(ArrayOrObject<'a>),
        Root(RootExpr<'a>),
        FirstMember(FirstMemberExpr<'a>),
        Function(FunctionExpr<'a>),
        Negate(NegateExpr<'a>),
        MethodCall(MethodCallExpr<'a>),
        Paren(ParenExpr<'a>),
        List(ListExpr<'a>),
        Cast(CastExpr<'a>),
        Isof(IsofExpr<'a>),
        Not(NotExpr<'a>),
    }

    pub enum ArithmeticExpr<'a> {
        Add(AddExpr<'a>),
        Sub(SubExpr<'a>),
        Mul(MulExpr<'a>),
        Div(DivExpr<'a>),
        Divby(DivbyExpr<'a>),
        Mod(ModExpr<'a>),
    }

    pub enum ComparisonExpr<'a> {
        Eq(EqExpr<'a>),
        Ne(NeExpr<'a>),
        Lt(LtExpr<'a>),
        Le(LeExpr<'a>),
        Gt(GtExpr<'a>),
        Ge(GeExpr<'a>),
        Has(HasExpr<'a>),
        In(InExpr<'a>),
    }

    pub enum LogicalExpr<'a> {
        And(AndExpr<'a>),
        Or(OrExpr<'a>),
    }

    /// `rootExpr = '$root/' ( entitySetName keyPredicate / singletonEntity ) [ singleNavigationExpr ]`
    pub struct RootExpr<'a> {
        pub prefix: Token<'a>,
        pub target: RootTarget<'a>,
        pub navigation: Option<SingleNavigationExpr<'a>>,
    }

    pub enum RootTarget<'a> {
        Entity(RootEntity<'a>),
        Singleton(SingletonEntity<'a>),
    }

    pub struct RootEntity<'a> {
        pub entity_set: EntitySetName<'a>,
        pub key: KeyPredicate<'a>,
    }

    /// `firstMemberExpr = memberExpr / inscopeVariableExpr [ "/" memberExpr ]`
    pub enum FirstMemberExpr<'a> {
        Member(MemberExpr<'a>),
        Inscope(Chain<InscopeVariableExpr<'a>, SingleNavigationExpr<'a>>),
    }

    /// `memberExpr = [ qualifiedEntityTypeName "/" ] ( propertyPathExpr / boundFunctionExpr / annotationExpr )`
    pub struct MemberExpr<'a> {
        pub type_cast: Option<Suffixed<'a, QualifiedEntityTypeName<'a>>>,
        pub member: Member<'a>,
    }

    pub enum Member<'a> {
        PropertyPath(PropertyPathExpr<'a>),
        BoundFunction(BoundFunctionExpr<'a>),
        Annotation(AnnotationExpr<'a>),
    }

    pub enum PropertyPathExpr<'a> {
        EntityColNavigation(Chain<EntityColNavigationProperty<'a>, Box<CollectionNavigationExpr<'a>>>),
        EntityNavigation(Chain<EntityNavigationProperty<'a>, SingleNavigationExpr<'a>>),
        ComplexColProperty(Chain<ComplexColProperty<'a>, Box<ComplexColPathExpr<'a>>>),
        ComplexProperty(Chain<ComplexProperty<'a>, Box<ComplexPathExpr<'a>>>),
        PrimitiveColProperty(Chain<PrimitiveColProperty<'a>, Box<CollectionPathExpr<'a>>>),
        PrimitiveProperty(Chain<PrimitiveProperty<'a>, Box<PrimitivePathExpr<'a>>>),
        StreamProperty(Chain<StreamProperty<'a>, Box<PrimitivePathExpr<'a>>>),
    }

    pub enum AnnotationPath<'a> {
        Collection(CollectionPathExpr<'a>),
        SingleNavigation(SingleNavigationExpr<'a>),
        Complex(ComplexPathExpr<'a>),
        Primitive(PrimitivePathExpr<'a>),
    }

    /// `annotation = AT [ namespace "." ] termName [ '#' annotationQualifier ]`
    pub struct Annotation<'a> {
        pub at: At<'a>,
        pub namespace: Option<Suffixed<'a, Namespace<'a>>>,
        pub term: TermName<'a>,
        pub qualifier: Option<Prefixed<'a, AnnotationQualifier<'a>>>,
    }

    pub enum InscopeVariableExpr<'a> {
        /// `'$it' / '$this'`
        Implicit(Token<'a>),
        Alias(ParameterAlias<'a>),
        Lambda(LambdaVariableExpr<'a>),
    }

    /// `collectionNavigationExpr = [ "/" qualifiedEntityTypeName ] [ keyPredicate [ singleNavigationExpr ] / collectionPathExpr ]`
    pub struct CollectionNavigationExpr<'a> {
        pub cast: Option<EntityCast<'a>>,
        pub path: Option<CollectionNavigationPath<'a>>,
    }

    pub enum CollectionNavigationPath<'a> {
        Key(Chain<KeyPredicate<'a>, SingleNavigationExpr<'a>>),
        Collection(CollectionPathExpr<'a>),
    }

    /// `complexColPathExpr = [ "/" qualifiedComplexTypeName ] [ collectionPathExpr ]`
    pub struct ComplexColPathExpr<'a> {
        pub cast: Option<ComplexCast<'a>>,
        pub path: Option<CollectionPathExpr<'a>>,
    }

    pub enum CollectionPathExpr<'a> {
        Count(Chain<Count<'a>, OptionList<'a, ExpandCountOption<'a>>>),
        BoundFunction(Prefixed<'a, BoundFunctionExpr<'a>>),
        Annotation(Prefixed<'a, AnnotationExpr<'a>>),
        Any(Prefixed<'a, AnyExpr<'a>>),
        All(Prefixed<'a, AllExpr<'a>>),
    }

    /// `complexPathExpr = [ "/" qualifiedComplexTypeName ] [ "/" propertyPathExpr / "/" boundFunctionExpr / "/" annotationExpr ]`
    pub struct ComplexPathExpr<'a> {
        pub cast: Option<ComplexCast<'a>>,
        pub path: Option<ComplexPathExprTail<'a>>,
    }

    pub enum ComplexPathExprTail<'a> {
        PropertyPath(Prefixed<'a, PropertyPathExpr<'a>>),
        BoundFunction(Prefixed<'a, BoundFunctionExpr<'a>>),
        Annotation(Prefixed<'a, AnnotationExpr<'a>>),
    }

    /// `primitivePathExpr = "/" [ annotationExpr / boundFunctionExpr ]`
    pub struct PrimitivePathExpr<'a> {
        pub slash: Token<'a>,
        pub path: Option<PrimitivePathExprTail<'a>>,
    }

    pub enum PrimitivePathExprTail<'a> {
        Annotation(AnnotationExpr<'a>),
        BoundFunction(BoundFunctionExpr<'a>),
    }

    /// `functionExpr = namespace "." ( ... )`
    pub struct FunctionExpr<'a> {
        pub namespace: Namespace<'a>,
        pub dot: Token<'a>,
        pub call: FunctionExprCall<'a>,
    }

    pub enum FunctionExprCall<'a> {
        EntityCol(ExprCall<'a, EntityColFunction<'a>, CollectionNavigationExpr<'a>>),
        Entity(ExprCall<'a, EntityFunction<'a>, SingleNavigationExpr<'a>>),
        ComplexCol(ExprCall<'a, ComplexColFunction<'a>, ComplexColPathExpr<'a>>),
        Complex(ExprCall<'a, ComplexFunction<'a>, ComplexPathExpr<'a>>),
        PrimitiveCol(ExprCall<'a, PrimitiveColFunction<'a>, CollectionPathExpr<'a>>),
        Primitive(ExprCall<'a, PrimitiveFunction<'a>, PrimitivePathExpr<'a>>),
    }

    /// `functionExprParameters = OPEN [ functionExprParameter *( COMMA functionExprParameter ) ] CLOSE`
    pub struct FunctionExprParameters<'a> {
        pub open: Open<'a>,
        pub parameters: Option<List<Comma<'a>, FunctionExprParameter<'a>>>,
        pub close: Close<'a>,
    }

    /// `functionExprParameter = parameterName EQ ( parameterAlias / parameterValue )`
    pub struct FunctionExprParameter<'a> {
        pub name: ParameterName<'a>,
        pub eq: Token<'a>,
        pub value: Box<FunctionExprArgument<'a>>,
    }

    pub enum FunctionExprArgument<'a> {
        Alias(ParameterAlias<'a>),
        Value(ParameterValue<'a>),
    }

    /// `anyExpr = "any" OPEN BWS [ lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr ] BWS CLOSE`
    pub struct AnyExpr<'a> {
        pub keyword: Token<'a>,
        pub open: Open<'a>,
        pub before: Bws<'a>,
        pub lambda: Option<Lambda<'a>>,
        pub after: Bws<'a>,
        pub close: Close<'a>,
    }

    /// `allExpr = "all" OPEN BWS lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr BWS CLOSE`
    pub struct AllExpr<'a> {
        pub keyword: Token<'a>,
        pub open: Open<'a>,
        pub before: Bws<'a>,
        pub lambda: Lambda<'a>,
        pub after: Bws<'a>,
        pub close: Close<'a>,
    }

    /// `lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr`
    pub struct Lambda<'a> {
        pub variable: LambdaVariableExpr<'a>,
        pub before_colon: Bws<'a>,
        pub colon: Colon<'a>,
        pub after_colon: Bws<'a>,
        pub predicate: Box<LambdaPredicateExpr<'a>>,
    }

    pub enum MethodCallExpr<'a> {
        IndexOf(IndexOfMethodCallExpr<'a>),
        ToLower(ToLowerMethodCallExpr<'a>),
        ToUpper(ToUpperMethodCallExpr<'a>),
        Trim(TrimMethodCallExpr<'a>),
        Substring(SubstringMethodCallExpr<'a>),
        Concat(ConcatMethodCallExpr<'a>),
        Length(LengthMethodCallExpr<'a>),
        Year(YearMethodCallExpr<'a>),
        Month(MonthMethodCallExpr<'a>),
        Day(DayMethodCallExpr<'a>),
        Hour(HourMethodCallExpr<'a>),
        Minute(MinuteMethodCallExpr<'a>),
        Second(SecondMethodCallExpr<'a>),
        Fractionalseconds(FractionalsecondsMethodCallExpr<'a>),
        Totalseconds(TotalsecondsMethodCallExpr<'a>),
        Date(DateMethodCallExpr<'a>),
        Time(TimeMethodCallExpr<'a>),
        Round(RoundMethodCallExpr<'a>),
        Floor(FloorMethodCallExpr<'a>),
        Ceiling(CeilingMethodCallExpr<'a>),
        Distance(DistanceMethodCallExpr<'a>),
        GeoLength(GeoLengthMethodCallExpr<'a>),
        TotalOffsetMinutes(TotalOffsetMinutesMethodCallExpr<'a>),
        MinDateTime(MinDateTimeMethodCallExpr<'a>),
        MaxDateTime(MaxDateTimeMethodCallExpr<'a>),
        Now(NowMethodCallExpr<'a>),
        Bool(BoolMethodCallExpr<'a>),
    }

    pub enum BoolMethodCallExpr<'a> {
        EndsWith(EndsWithMethodCallExpr<'a>),
        StartsWith(StartsWithMethodCallExpr<'a>),
        Contains(ContainsMethodCallExpr<'a>),
        Intersects(IntersectsMethodCallExpr<'a>),
        HasSubset(HasSubsetMethodCallExpr<'a>),
        HasSubsequence(HasSubsequenceMethodCallExpr<'a>),
    }

    /// `BWS commonExpr BWS`, an argument of a method or an item of a list.
    pub struct PaddedExpr<'a> {
        pub before: Bws<'a>,
        pub expr: Box<CommonExpr<'a>>,
        pub after: Bws<'a>,
    }

    /// `name OPEN BWS CLOSE`
    pub struct NullaryCall<'a> {
        pub method: Token<'a>,
        pub open: Open<'a>,
        pub bws: Bws<'a>,
        pub close: Close<'a>,
    }

    /// `name OPEN BWS commonExpr BWS CLOSE`
    pub struct UnaryCall<'a> {
        pub method: Token<'a>,
        pub open: Open<'a>,
        pub argument: PaddedExpr<'a>,
        pub close: Close<'a>,
    }

    /// `name OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS CLOSE`
    pub struct BinaryCall<'a> {
        pub method: Token<'a>,
        pub open: Open<'a>,
        pub first: PaddedExpr<'a>,
        pub comma: Comma<'a>,
        pub second: PaddedExpr<'a>,
        pub close: Close<'a>,
    }

    /// `"substring" OPEN BWS commonExpr BWS COMMA BWS commonExpr BWS [ COMMA BWS commonExpr BWS ] CLOSE`
    pub struct SubstringMethodCallExpr<'a> {
        pub method: Token<'a>,
        pub open: Open<'a>,
        pub first: PaddedExpr<'a>,
        pub comma: Comma<'a>,
        pub second: PaddedExpr<'a>,
        pub third: Option<Item<Comma<'a>, PaddedExpr<'a>>>,
        pub close: Close<'a>,
    }

    /// `parenExpr = OPEN BWS commonExpr BWS CLOSE`
    pub struct ParenExpr<'a> {
        pub open: Open<'a>,
        pub expr: PaddedExpr<'a>,
        pub close: Close<'a>,
    }

    /// `listExpr = OPEN BWS commonExpr BWS *( COMMA BWS commonExpr BWS ) CLOSE`
    pub struct ListExpr<'a> {
        pub open: Open<'a>,
        pub items: List<Comma<'a>, PaddedExpr<'a>>,
        pub close: Close<'a>,
    }

    /// `negateExpr = "-" BWS commonExpr`
    pub struct NegateExpr<'a> {
        pub minus: Token<'a>,
        pub bws: Bws<'a>,
        pub expr: Box<CommonExpr<'a>>,
    }

    /// `notExpr = "not" RWS boolCommonExpr`
    pub struct NotExpr<'a> {
        pub keyword: Token<'a>,
        pub rws: Rws<'a>,
        pub expr: Box<BoolCommonExpr<'a>>,
    }

    /// `"isof" / "cast"` `OPEN BWS [ commonExpr BWS COMMA BWS ] qualifiedTypeName BWS CLOSE`
    pub struct TypeExpr<'a> {
        pub keyword: Token<'a>,
        pub open: Open<'a>,
        pub before: Bws<'a>,
        pub subject: Option<TypeExprSubject<'a>>,
        pub type_name: QualifiedTypeName<'a>,
        pub after: Bws<'a>,
        pub close: Close<'a>,
    }

    /// `commonExpr BWS COMMA BWS`
    pub struct TypeExprSubject<'a> {
        pub expr: Box<CommonExpr<'a>>,
        pub before: Bws<'a>,
        pub comma: Comma<'a>,
        pub after: Bws<'a>,
    }
}

/// `RWS operator RWS right`, the shape of every binary operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorExpr<'a, R> {
    pub before: Rws<'a>,
    pub operator: Token<'a>,
    pub after: Rws<'a>,
    pub right: Box<R>,
}

impl<'a, R: Syntax<'a>> Syntax<'a> for OperatorExpr<'a, R> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.before.tokens_into(out);
        out.push(self.operator);
        self.after.tokens_into(out);
        self.right.tokens_into(out);
    }
}

/// `function functionExprParameters [ path ]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprCall<'a, N, P> {
    pub function: N,
    pub parameters: FunctionExprParameters<'a>,
    pub path: Option<Box<P>>,
}

impl<'a, N: Syntax<'a>, P: Syntax<'a>> Syntax<'a> for ExprCall<'a, N, P> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.function.tokens_into(out);
        self.parameters.tokens_into(out);
        self.path.tokens_into(out);
    }
}

impl<'a> CommonExpr<'a> {
    /// An operand without operators.
    pub fn is_simple(&self) -> bool {
        self.arithmetic.is_none() && self.comparison.is_none() && self.logical.is_none()
    }
}

impl<'a> ArithmeticExpr<'a> {
    pub fn operator(&self) -> &OperatorExpr<'a, CommonExpr<'a>> {
        match self {
            ArithmeticExpr::Add(op)
            | ArithmeticExpr::Sub(op)
            | ArithmeticExpr::Mul(op)
            | ArithmeticExpr::Div(op)
            | ArithmeticExpr::Divby(op)
            | ArithmeticExpr::Mod(op) => op,
        }
    }
}

impl<'a> LogicalExpr<'a> {
    pub fn operator(&self) -> &OperatorExpr<'a, BoolCommonExpr<'a>> {
        match self {
            LogicalExpr::And(op) | LogicalExpr::Or(op) => op,
        }
    }
}

impl<'a> FunctionExprParameters<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &FunctionExprParameter<'a>> {
        self.parameters.iter().flat_map(List::iter)
    }
}

impl<'a> FunctionExprCall<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            FunctionExprCall::EntityCol(call) => call.function.name(),
            FunctionExprCall::Entity(call) => call.function.name(),
            FunctionExprCall::ComplexCol(call) => call.function.name(),
            FunctionExprCall::Complex(call) => call.function.name(),
            FunctionExprCall::PrimitiveCol(call) => call.function.name(),
            FunctionExprCall::Primitive(call) => call.function.name(),
        }
    }

    pub fn parameters(&self) -> &FunctionExprParameters<'a> {
        match self {
            FunctionExprCall::EntityCol(call) => &call.parameters,
            FunctionExprCall::Entity(call) => &call.parameters,
            FunctionExprCall::ComplexCol(call) => &call.parameters,
            FunctionExprCall::Complex(call) => &call.parameters,
            FunctionExprCall::PrimitiveCol(call) => &call.parameters,
            FunctionExprCall::Primitive(call) => &call.parameters,
        }
    }
}

impl<'a> MethodCallExpr<'a> {
    /// The method name as written.
    pub fn method(&self) -> Token<'a> {
        match self {
            MethodCallExpr::IndexOf(call)
            | MethodCallExpr::Concat(call)
            | MethodCallExpr::Distance(call) => call.method,
            MethodCallExpr::ToLower(call)
            | MethodCallExpr::ToUpper(call)
            | MethodCallExpr::Trim(call)
            | MethodCallExpr::Length(call)
            | MethodCallExpr::Year(call)
            | MethodCallExpr::Month(call)
            | MethodCallExpr::Day(call)
            | MethodCallExpr::Hour(call)
            | MethodCallExpr::Minute(call)
            | MethodCallExpr::Second(call)
            | MethodCallExpr::Fractionalseconds(call)
            | MethodCallExpr::Totalseconds(call)
            | MethodCallExpr::Date(call)
            | MethodCallExpr::Time(call)
            | MethodCallExpr::Round(call)
            | MethodCallExpr::Floor(call)
            | MethodCallExpr::Ceiling(call)
            | MethodCallExpr::GeoLength(call)
            | MethodCallExpr::TotalOffsetMinutes(call) => call.method,
            MethodCallExpr::MinDateTime(call)
            | MethodCallExpr::MaxDateTime(call)
            | MethodCallExpr::Now(call) => call.method,
            MethodCallExpr::Substring(call) => call.method,
            MethodCallExpr::Bool(call) => match call {
                BoolMethodCallExpr::EndsWith(call)
                | BoolMethodCallExpr::StartsWith(call)
                | BoolMethodCallExpr::Contains(call)
                | BoolMethodCallExpr::Intersects(call)
                | BoolMethodCallExpr::HasSubset(call)
                | BoolMethodCallExpr::HasSubsequence(call) => call.method,
            },
        }
    }

    /// The arguments, in order.
    pub fn arguments(&self) -> Vec<&CommonExpr<'a>> {
        match self {
            MethodCallExpr::IndexOf(call)
            | MethodCallExpr::Concat(call)
            | MethodCallExpr::Distance(call) => call.arguments(),
            MethodCallExpr::ToLower(call)
            | MethodCallExpr::ToUpper(call)
            | MethodCallExpr::Trim(call)
            | MethodCallExpr::Length(call)
            | MethodCallExpr::Year(call)
            | MethodCallExpr::Month(call)
            | MethodCallExpr::Day(call)
            | MethodCallExpr::Hour(call)
            | MethodCallExpr::Minute(call)
            | MethodCallExpr::Second(call)
            | MethodCallExpr::Fractionalseconds(call)
            | MethodCallExpr::Totalseconds(call)
            | MethodCallExpr::Date(call)
            | MethodCallExpr::Time(call)
            | MethodCallExpr::Round(call)
            | MethodCallExpr::Floor(call)
            | MethodCallExpr::Ceiling(call)
            | MethodCallExpr::GeoLength(call)
            | MethodCallExpr::TotalOffsetMinutes(call) => vec![&*call.argument.expr],
            MethodCallExpr::MinDateTime(_)
            | MethodCallExpr::MaxDateTime(_)
            | MethodCallExpr::Now(_) => Vec::new(),
            MethodCallExpr::Substring(call) => {
                let mut arguments = vec![&*call.first.expr, &*call.second.expr];
                arguments.extend(call.third.as_ref().map(|third| &*third.value.expr));
                arguments
            }
            MethodCallExpr::Bool(call) => match call {
                BoolMethodCallExpr::EndsWith(call)
                | BoolMethodCallExpr::StartsWith(call)
                | BoolMethodCallExpr::Contains(call)
                | BoolMethodCallExpr::Intersects(call)
                | BoolMethodCallExpr::HasSubset(call)
                | BoolMethodCallExpr::HasSubsequence(call) => call.arguments(),
            },
        }
    }
}

impl<'a> BinaryCall<'a> {
    pub fn arguments(&self) -> Vec<&CommonExpr<'a>> {
        vec![&*self.first.expr, &*self.second.expr]
    }
}
