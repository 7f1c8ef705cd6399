//! URI syntax (RFC 3986) as far as the OData rules reference it.

use super::Token;

node! {
    /// `URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]`
    pub struct Uri<'a> {
        pub scheme: Token<'a>,
        pub colon: Token<'a>,
        pub hier_part: HierPart<'a>,
        pub query: Option<UriQuery<'a>>,
        pub fragment: Option<UriFragment<'a>>,
    }

    pub struct UriQuery<'a> {
        pub question_mark: Token<'a>,
        pub query: Token<'a>,
    }

    pub struct UriFragment<'a> {
        pub hash: Token<'a>,
        pub fragment: Token<'a>,
    }

    pub enum HierPart<'a> {
        Authority(AuthorityPath<'a>),
        /// `path-absolute`
        Absolute(Token<'a>),
        /// `path-rootless`
        Rootless(Token<'a>),
    }

    /// `"//" authority path-abempty`
    pub struct AuthorityPath<'a> {
        pub slashes: Token<'a>,
        pub authority: Authority<'a>,
        pub path: Token<'a>,
    }

    /// `authority = [ userinfo "@" ] host [ ":" port ]`
    pub struct Authority<'a> {
        pub userinfo: Option<Userinfo<'a>>,
        pub host: Host<'a>,
        pub port: Option<Port<'a>>,
    }

    pub struct Userinfo<'a> {
        pub userinfo: Token<'a>,
        pub at: Token<'a>,
    }

    /// `":" port`
    pub struct Port<'a> {
        pub colon: Token<'a>,
        pub digits: Token<'a>,
    }

    /// `host = IP-literal / IPv4address / reg-name`
    pub enum Host<'a> {
        IpLiteral(IpLiteral<'a>),
        Ipv4(Token<'a>),
        RegName(Token<'a>),
    }

    /// `IP-literal = "[" ( IPv6address / IPvFuture ) "]"`
    pub struct IpLiteral<'a> {
        pub open: Token<'a>,
        pub address: IpAddress<'a>,
        pub close: Token<'a>,
    }

    pub enum IpAddress<'a> {
        V6(Token<'a>),
        Future(Token<'a>),
    }
}
