//! Header values (section 8): OData request and response headers, name
//! included, as in `OData-Version: 4.01`.

use serde::Serialize;

use super::literal::BooleanValue;
use super::names::{Namespace, OdataIdentifier, TermName};
use super::punct::{Comma, Star};
use super::uri::Uri;
use super::{List, Prefixed, Syntax, Token};

lexical! {
    /// `request-id = 1*unreserved`
    RequestId,
    /// `IRI-in-header = 1*( VCHAR / obs-text )`
    IriInHeader,
}

node! {
    pub enum Header<'a> {
        ContentId(ContentId<'a>),
        EntityId(EntityId<'a>),
        Isolation(Isolation<'a>),
        MaxVersion(OdataMaxVersion<'a>),
        Version(OdataVersion<'a>),
        Prefer(Prefer<'a>),
    }

    /// The header name up to and including the whitespace after the colon.
    pub struct HeaderName<'a> {
        /// `"OData-"`, for the headers where it is optional.
        pub prefix: Option<Token<'a>>,
        pub name: Token<'a>,
        pub colon: Token<'a>,
        pub ows: Ows<'a>,
    }

    /// `content-id = "Content-ID" ":" OWS request-id`
    pub struct ContentId<'a> {
        pub name: HeaderName<'a>,
        pub request_id: RequestId<'a>,
    }

    /// `entityid = [ "OData-" ] "EntityID" ":" OWS IRI-in-header`
    pub struct EntityId<'a> {
        pub name: HeaderName<'a>,
        pub iri: IriInHeader<'a>,
    }

    /// `isolation = [ "OData-" ] "Isolation" ":" OWS "snapshot"`
    pub struct Isolation<'a> {
        pub name: HeaderName<'a>,
        pub snapshot: Token<'a>,
    }

    /// `odata-maxversion = "OData-MaxVersion" ":" OWS 1*DIGIT "." 1*DIGIT`
    pub struct OdataMaxVersion<'a> {
        pub name: HeaderName<'a>,
        pub major: Token<'a>,
        pub dot: Token<'a>,
        pub minor: Token<'a>,
    }

    /// `odata-version = "OData-Version" ":" OWS "4.0" [ oneToNine ]`
    pub struct OdataVersion<'a> {
        pub name: HeaderName<'a>,
        pub version: Token<'a>,
        pub revision: Option<Token<'a>>,
    }

    /// `prefer = "Prefer" ":" OWS preference *( COMMA preference )`
    pub struct Prefer<'a> {
        pub name: HeaderName<'a>,
        pub preferences: List<Comma<'a>, Preference<'a>>,
    }

    pub enum Preference<'a> {
        AllowEntityReferences(PreferenceName<'a>),
        Callback(CallbackPreference<'a>),
        ContinueOnError(ContinueOnErrorPreference<'a>),
        IncludeAnnotations(IncludeAnnotationsPreference<'a>),
        Maxpagesize(MaxpagesizePreference<'a>),
        RespondAsync(Token<'a>),
        Return(ReturnPreference<'a>),
        TrackChanges(PreferenceName<'a>),
        Wait(WaitPreference<'a>),
    }

    /// `[ "odata." ] name`
    pub struct PreferenceName<'a> {
        pub odata: Option<Token<'a>>,
        pub name: Token<'a>,
    }

    /// `OWS = *( SP / HTAB )`
    pub struct Ows<'a> {
        pub text: Option<Token<'a>>,
    }

    /// `EQ-h = BWS-h EQ BWS-h`
    pub struct EqH<'a> {
        pub before: Ows<'a>,
        pub eq: Token<'a>,
        pub after: Ows<'a>,
    }

    /// `[ "odata." ] "callback" OWS ";" OWS "url" EQ-h DQUOTE URI DQUOTE`
    pub struct CallbackPreference<'a> {
        pub name: PreferenceName<'a>,
        pub before_semi: Ows<'a>,
        pub semi: Token<'a>,
        pub after_semi: Ows<'a>,
        pub url: Token<'a>,
        pub eq: EqH<'a>,
        pub open_quote: Token<'a>,
        pub uri: Uri<'a>,
        pub close_quote: Token<'a>,
    }

    /// `[ "odata." ] "continue-on-error" [ EQ-h booleanValue ]`
    pub struct ContinueOnErrorPreference<'a> {
        pub name: PreferenceName<'a>,
        pub value: Option<Setting<'a, BooleanValue<'a>>>,
    }

    /// `[ "odata." ] "include-annotations" EQ-h DQUOTE annotationsList DQUOTE`
    pub struct IncludeAnnotationsPreference<'a> {
        pub name: PreferenceName<'a>,
        pub eq: EqH<'a>,
        pub open_quote: Token<'a>,
        pub annotations: AnnotationsList<'a>,
        pub close_quote: Token<'a>,
    }

    /// `annotationIdentifier = [ excludeOperator ] ( STAR / namespace "." ( termName / STAR ) ) [ "#" odataIdentifier ]`
    pub struct AnnotationIdentifier<'a> {
        pub exclude: Option<Token<'a>>,
        pub target: AnnotationTarget<'a>,
        pub qualifier: Option<Prefixed<'a, OdataIdentifier<'a>>>,
    }

    pub enum AnnotationTarget<'a> {
        All(Star<'a>),
        Namespace(NamespaceTerms<'a>),
    }

    /// `namespace "." ( termName / STAR )`
    pub struct NamespaceTerms<'a> {
        pub namespace: Namespace<'a>,
        pub dot: Token<'a>,
        pub term: TermOrStar<'a>,
    }

    pub enum TermOrStar<'a> {
        Term(TermName<'a>),
        All(Star<'a>),
    }

    /// `[ "odata." ] "maxpagesize" EQ-h oneToNine *DIGIT`
    pub struct MaxpagesizePreference<'a> {
        pub name: PreferenceName<'a>,
        pub eq: EqH<'a>,
        pub size: Token<'a>,
    }

    /// `"return" EQ-h ( 'representation' / 'minimal' )`
    pub struct ReturnPreference<'a> {
        pub name: Token<'a>,
        pub eq: EqH<'a>,
        pub value: Token<'a>,
    }

    /// `"wait" EQ-h 1*DIGIT`
    pub struct WaitPreference<'a> {
        pub name: Token<'a>,
        pub eq: EqH<'a>,
        pub seconds: Token<'a>,
    }
}

/// `annotationsList = annotationIdentifier *( COMMA annotationIdentifier )`
pub type AnnotationsList<'a> = List<Comma<'a>, AnnotationIdentifier<'a>>;

/// `EQ-h value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting<'a, T> {
    pub eq: EqH<'a>,
    pub value: T,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for Setting<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.eq.tokens_into(out);
        self.value.tokens_into(out);
    }
}

impl<'a> Header<'a> {
    pub fn name(&self) -> &HeaderName<'a> {
        match self {
            Header::ContentId(header) => &header.name,
            Header::EntityId(header) => &header.name,
            Header::Isolation(header) => &header.name,
            Header::MaxVersion(header) => &header.name,
            Header::Version(header) => &header.name,
            Header::Prefer(header) => &header.name,
        }
    }
}

impl<'a> HeaderName<'a> {
    /// The name without the optional `OData-` prefix, as written.
    pub fn as_str(&self) -> &'a str {
        self.name.text()
    }
}

impl OdataMaxVersion<'_> {
    /// `(major, minor)`, `None` when a part does not fit a `u32`.
    pub fn version(&self) -> Option<(u32, u32)> {
        Some((self.major.text().parse().ok()?, self.minor.text().parse().ok()?))
    }
}

impl MaxpagesizePreference<'_> {
    pub fn value(&self) -> Option<u64> {
        self.size.text().parse().ok()
    }
}

impl WaitPreference<'_> {
    pub fn value(&self) -> Option<u64> {
        self.seconds.text().parse().ok()
    }
}
