pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AsyncGeocoder, BatchGeocoder, BlockingGeocoder, GeocodeTask, GeocodeUseCase, Geocoder,
    HttpRequest, HttpResponse, HttpTransport, SynthesizedBatch,
};

pub use cli::{Commands, OutputFormat, Provider};

pub use connector::{
    AddressAction, BatchAction, Container, ContainerConfig, GoogleGeocoder, GoogleRequest,
    MapQuestAction, MapQuestGeocoder, MapQuestRequest, MockTransport, ReqwestTransport,
    ReverseAction, Router, GOOGLE_API_KEY_ENV, MAPQUEST_API_KEY_ENV,
};

pub use domain::{
    Address, AddressComponent, AddressComponents, AddressType, ApiKey, BatchItem, Bounds,
    DataFormat, GeocodeError, GeocodeOutcome, GeocodeQuery, GeocodeResult, GoogleAddressType,
    Location, MapQuestQuality, Precision, ProviderErrorKind, RequestOptions, RequestVerb,
    TransportErrorKind,
};
