//! The service root, the relative URI and resource paths.

use serde::Serialize;

use super::context::Context;
use super::literal::PrimitiveLiteral;
use super::names::*;
use super::punct::{At, Close, Comma, Open};
use super::query::{
    BatchOptions, EntityCastOptions, EntityOptions, MetadataOptions, QueryOptions,
};
use super::uri::{Host, Port};
use super::{Chain, List, Prefixed, Suffixed, Syntax, Token};

lexical! {
    /// `keyPathLiteral = *pchar`
    KeyPathLiteral,
    /// `each = '/$each'`
    Each,
    /// `count = '/$count'`
    Count,
    /// `ref = '/$ref'`
    Ref,
    /// `value = '/$value'`
    Value,
}

identifier! {
    KeyPropertyAlias,
    ParameterName,
}

/// `keyPropertyValue = primitiveLiteral`
pub type KeyPropertyValue<'a> = PrimitiveLiteral<'a>;

/// `actionImportCall = actionImport`
pub type ActionImportCall<'a> = ActionImport<'a>;

/// `boundActionCall = namespace "." action`
pub type BoundActionCall<'a> = Qualified<'a, Action<'a>>;

/// `"/" qualifiedEntityTypeName`, a type cast segment.
pub type EntityCast<'a> = Prefixed<'a, QualifiedEntityTypeName<'a>>;

/// `"/" qualifiedComplexTypeName`
pub type ComplexCast<'a> = Prefixed<'a, QualifiedComplexTypeName<'a>>;

node! {
    /// `odataUri = serviceRoot [ odataRelativeUri ]`
    pub struct OdataUri<'a> {
        pub service_root: ServiceRoot<'a>,
        pub relative: Option<OdataRelativeUri<'a>>,
    }

    /// `serviceRoot = ( "https" / "http" ) "://" host [ ":" port ] "/" *( segment-nz "/" )`
    pub struct ServiceRoot<'a> {
        pub scheme: Token<'a>,
        pub separator: Token<'a>,
        pub host: Host<'a>,
        pub port: Option<Port<'a>>,
        pub slash: Token<'a>,
        pub segments: Vec<Suffixed<'a, Token<'a>>>,
    }

    pub enum OdataRelativeUri<'a> {
        Batch(BatchUri<'a>),
        Entity(EntityUri<'a>),
        EntityCast(EntityCastUri<'a>),
        Metadata(MetadataUri<'a>),
        Resource(ResourceUri<'a>),
    }

    /// `'$batch' [ "?" batchOptions ]`
    pub struct BatchUri<'a> {
        pub keyword: Token<'a>,
        pub options: Option<Prefixed<'a, BatchOptions<'a>>>,
    }

    /// `'$entity' "?" entityOptions`
    pub struct EntityUri<'a> {
        pub keyword: Token<'a>,
        pub question_mark: Token<'a>,
        pub options: EntityOptions<'a>,
    }

    /// `'$entity' "/" qualifiedEntityTypeName "?" entityCastOptions`
    pub struct EntityCastUri<'a> {
        pub keyword: Token<'a>,
        pub cast: EntityCast<'a>,
        pub question_mark: Token<'a>,
        pub options: EntityCastOptions<'a>,
    }

    /// `'$metadata' [ "?" metadataOptions ] [ context ]`
    pub struct MetadataUri<'a> {
        pub keyword: Token<'a>,
        pub options: Option<Prefixed<'a, MetadataOptions<'a>>>,
        pub context: Option<Context<'a>>,
    }

    /// `resourcePath [ "?" queryOptions ]`
    pub struct ResourceUri<'a> {
        pub path: ResourcePath<'a>,
        pub options: Option<Prefixed<'a, QueryOptions<'a>>>,
    }

    pub enum ResourcePath<'a> {
        EntitySet(Chain<EntitySetName<'a>, CollectionNavigation<'a>>),
        Singleton(Chain<SingletonEntity<'a>, SingleNavigation<'a>>),
        ActionImport(ActionImportCall<'a>),
        EntityColFunctionImport(Chain<EntityColFunctionImportCall<'a>, CollectionNavigation<'a>>),
        EntityFunctionImport(Chain<EntityFunctionImportCall<'a>, SingleNavigation<'a>>),
        ComplexColFunctionImport(Chain<ComplexColFunctionImportCall<'a>, ComplexColPath<'a>>),
        ComplexFunctionImport(Chain<ComplexFunctionImportCall<'a>, ComplexPath<'a>>),
        PrimitiveColFunctionImport(Chain<PrimitiveColFunctionImportCall<'a>, PrimitiveColPath<'a>>),
        PrimitiveFunctionImport(Chain<PrimitiveFunctionImportCall<'a>, PrimitivePath<'a>>),
        FunctionImportNoParens(FunctionImportCallNoParens<'a>),
        Crossjoin(Crossjoin<'a>),
        All(AllPath<'a>),
    }

    /// `'$all' [ "/" qualifiedEntityTypeName ]`
    pub struct AllPath<'a> {
        pub keyword: Token<'a>,
        pub cast: Option<EntityCast<'a>>,
    }

    /// `collectionNavigation = [ "/" qualifiedEntityTypeName ] [ collectionNavPath ]`
    pub struct CollectionNavigation<'a> {
        pub cast: Option<EntityCast<'a>>,
        pub path: Option<CollectionNavPath<'a>>,
    }

    pub enum CollectionNavPath<'a> {
        Key(Chain<KeyPredicate<'a>, SingleNavigation<'a>>),
        Filter(Chain<FilterInPath<'a>, Box<CollectionNavigation<'a>>>),
        Each(Chain<Each<'a>, BoundOperation<'a>>),
        BoundOperation(BoundOperation<'a>),
        Count(Count<'a>),
        Ref(Ref<'a>),
    }

    pub enum KeyPredicate<'a> {
        Simple(SimpleKey<'a>),
        Compound(CompoundKey<'a>),
        Segments(KeyPathSegments<'a>),
    }

    /// `simpleKey = OPEN ( parameterAlias / keyPropertyValue ) CLOSE`
    pub struct SimpleKey<'a> {
        pub open: Open<'a>,
        pub value: ParameterValueOrAlias<'a>,
        pub close: Close<'a>,
    }

    /// `parameterAlias / primitiveLiteral`
    pub enum ParameterValueOrAlias<'a> {
        Alias(ParameterAlias<'a>),
        Literal(PrimitiveLiteral<'a>),
    }

    /// `compoundKey = OPEN keyValuePair *( COMMA keyValuePair ) CLOSE`
    pub struct CompoundKey<'a> {
        pub open: Open<'a>,
        pub pairs: List<Comma<'a>, KeyValuePair<'a>>,
        pub close: Close<'a>,
    }

    pub struct KeyValuePair<'a> {
        pub key: KeyName<'a>,
        pub eq: Token<'a>,
        pub value: ParameterValueOrAlias<'a>,
    }

    pub enum KeyName<'a> {
        Property(PrimitiveKeyProperty<'a>),
        Alias(KeyPropertyAlias<'a>),
    }

    /// `keyPathSegments = 1*( "/" keyPathLiteral )`
    pub struct KeyPathSegments<'a> {
        pub segments: Vec<Prefixed<'a, KeyPathLiteral<'a>>>,
    }

    /// `singleNavigation = [ "/" qualifiedEntityTypeName ] [ "/" propertyPath / boundOperation / ref / value ]`
    pub struct SingleNavigation<'a> {
        pub cast: Option<EntityCast<'a>>,
        pub path: Option<SingleNavigationPath<'a>>,
    }

    pub enum SingleNavigationPath<'a> {
        Property(Prefixed<'a, Box<PropertyPath<'a>>>),
        BoundOperation(BoundOperation<'a>),
        Ref(Ref<'a>),
        Value(Value<'a>),
    }

    pub enum PropertyPath<'a> {
        EntityColNavigation(Chain<EntityColNavigationProperty<'a>, CollectionNavigation<'a>>),
        EntityNavigation(Chain<EntityNavigationProperty<'a>, SingleNavigation<'a>>),
        ComplexColProperty(Chain<ComplexColProperty<'a>, ComplexColPath<'a>>),
        ComplexProperty(Chain<ComplexProperty<'a>, ComplexPath<'a>>),
        PrimitiveColProperty(Chain<PrimitiveColProperty<'a>, PrimitiveColPath<'a>>),
        PrimitiveProperty(Chain<PrimitiveProperty<'a>, PrimitivePath<'a>>),
        StreamProperty(Chain<StreamProperty<'a>, BoundOperation<'a>>),
    }

    /// `primitiveColPath = count / boundOperation / ordinalIndex`
    pub enum PrimitiveColPath<'a> {
        Count(Count<'a>),
        BoundOperation(BoundOperation<'a>),
        OrdinalIndex(OrdinalIndex<'a>),
    }

    /// `primitivePath = value / boundOperation`
    pub enum PrimitivePath<'a> {
        Value(Value<'a>),
        BoundOperation(BoundOperation<'a>),
    }

    pub enum ComplexColPath<'a> {
        OrdinalIndex(OrdinalIndex<'a>),
        Cast(ComplexColCast<'a>),
    }

    /// `[ "/" qualifiedComplexTypeName ] [ count / boundOperation ]`
    pub struct ComplexColCast<'a> {
        pub cast: Option<ComplexCast<'a>>,
        pub path: Option<ComplexColCastPath<'a>>,
    }

    pub enum ComplexColCastPath<'a> {
        Count(Count<'a>),
        BoundOperation(BoundOperation<'a>),
    }

    /// `complexPath = [ "/" qualifiedComplexTypeName ] [ "/" propertyPath / boundOperation ]`
    pub struct ComplexPath<'a> {
        pub cast: Option<ComplexCast<'a>>,
        pub path: Option<ComplexPathTail<'a>>,
    }

    pub enum ComplexPathTail<'a> {
        Property(Prefixed<'a, Box<PropertyPath<'a>>>),
        BoundOperation(BoundOperation<'a>),
    }

    /// `filterInPath = '/$filter' EQ parameterAlias`
    pub struct FilterInPath<'a> {
        pub keyword: Token<'a>,
        pub eq: Token<'a>,
        pub alias: ParameterAlias<'a>,
    }

    /// `ordinalIndex = "/" 1*DIGIT`
    pub struct OrdinalIndex<'a> {
        pub slash: Token<'a>,
        pub index: Token<'a>,
    }

    /// `boundOperation = "/" ( boundActionCall / ... / boundFunctionCallNoParens )`
    pub struct BoundOperation<'a> {
        pub slash: Token<'a>,
        pub call: BoundCall<'a>,
    }

    pub enum BoundCall<'a> {
        Action(BoundActionCall<'a>),
        EntityColFunction(Chain<BoundEntityColFunctionCall<'a>, Box<CollectionNavigation<'a>>>),
        EntityFunction(Chain<BoundEntityFunctionCall<'a>, Box<SingleNavigation<'a>>>),
        ComplexColFunction(Chain<BoundComplexColFunctionCall<'a>, Box<ComplexColPath<'a>>>),
        ComplexFunction(Chain<BoundComplexFunctionCall<'a>, Box<ComplexPath<'a>>>),
        PrimitiveColFunction(Chain<BoundPrimitiveColFunctionCall<'a>, Box<PrimitiveColPath<'a>>>),
        PrimitiveFunction(Chain<BoundPrimitiveFunctionCall<'a>, Box<PrimitivePath<'a>>>),
        NoParens(BoundFunctionCallNoParens<'a>),
    }

    pub enum BoundFunctionCallNoParens<'a> {
        Entity(Qualified<'a, EntityFunction<'a>>),
        EntityCol(Qualified<'a, EntityColFunction<'a>>),
        Complex(Qualified<'a, ComplexFunction<'a>>),
        ComplexCol(Qualified<'a, ComplexColFunction<'a>>),
        Primitive(Qualified<'a, PrimitiveFunction<'a>>),
        PrimitiveCol(Qualified<'a, PrimitiveColFunction<'a>>),
    }

    pub enum FunctionImportCallNoParens<'a> {
        Entity(EntityFunctionImport<'a>),
        EntityCol(EntityColFunctionImport<'a>),
        Complex(ComplexFunctionImport<'a>),
        ComplexCol(ComplexColFunctionImport<'a>),
        Primitive(PrimitiveFunctionImport<'a>),
        PrimitiveCol(PrimitiveColFunctionImport<'a>),
    }

    /// `functionParameters = OPEN [ functionParameter *( COMMA functionParameter ) ] CLOSE`
    pub struct FunctionParameters<'a> {
        pub open: Open<'a>,
        pub parameters: Option<List<Comma<'a>, FunctionParameter<'a>>>,
        pub close: Close<'a>,
    }

    /// `functionParameter = parameterName EQ ( parameterAlias / primitiveLiteral )`
    pub struct FunctionParameter<'a> {
        pub name: ParameterName<'a>,
        pub eq: Token<'a>,
        pub value: ParameterValueOrAlias<'a>,
    }

    /// `parameterAlias = AT odataIdentifier`
    pub struct ParameterAlias<'a> {
        pub at: At<'a>,
        pub name: OdataIdentifier<'a>,
    }

    /// `crossjoin = '$crossjoin' OPEN entitySetName *( COMMA entitySetName ) CLOSE`
    pub struct Crossjoin<'a> {
        pub keyword: Token<'a>,
        pub open: Open<'a>,
        pub entity_sets: List<Comma<'a>, EntitySetName<'a>>,
        pub close: Close<'a>,
    }
}

/// A function name followed by its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call<'a, N> {
    pub name: N,
    pub parameters: FunctionParameters<'a>,
}

impl<'a, N: Syntax<'a>> Syntax<'a> for Call<'a, N> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.name.tokens_into(out);
        self.parameters.tokens_into(out);
    }
}

pub type EntityFunctionImportCall<'a> = Call<'a, EntityFunctionImport<'a>>;
pub type EntityColFunctionImportCall<'a> = Call<'a, EntityColFunctionImport<'a>>;
pub type ComplexFunctionImportCall<'a> = Call<'a, ComplexFunctionImport<'a>>;
pub type ComplexColFunctionImportCall<'a> = Call<'a, ComplexColFunctionImport<'a>>;
pub type PrimitiveFunctionImportCall<'a> = Call<'a, PrimitiveFunctionImport<'a>>;
pub type PrimitiveColFunctionImportCall<'a> = Call<'a, PrimitiveColFunctionImport<'a>>;

pub type BoundEntityFunctionCall<'a> = Call<'a, Qualified<'a, EntityFunction<'a>>>;
pub type BoundEntityColFunctionCall<'a> = Call<'a, Qualified<'a, EntityColFunction<'a>>>;
pub type BoundComplexFunctionCall<'a> = Call<'a, Qualified<'a, ComplexFunction<'a>>>;
pub type BoundComplexColFunctionCall<'a> = Call<'a, Qualified<'a, ComplexColFunction<'a>>>;
pub type BoundPrimitiveFunctionCall<'a> = Call<'a, Qualified<'a, PrimitiveFunction<'a>>>;
pub type BoundPrimitiveColFunctionCall<'a> = Call<'a, Qualified<'a, PrimitiveColFunction<'a>>>;

impl<'a> ParameterAlias<'a> {
    /// The alias without its `@`.
    pub fn name(&self) -> &'a str {
        self.name.as_str()
    }
}

impl<'a> FunctionParameters<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &FunctionParameter<'a>> {
        self.parameters.iter().flat_map(|parameters| parameters.iter())
    }
}

impl<'a> KeyPredicate<'a> {
    /// Number of key values in the predicate.
    pub fn len(&self) -> usize {
        match self {
            KeyPredicate::Simple(_) => 1,
            KeyPredicate::Compound(key) => key.pairs.len(),
            KeyPredicate::Segments(key) => key.segments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
