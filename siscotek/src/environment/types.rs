use siscotek_core_contact_impl::ContactFeatureServiceImpl;
use siscotek_core_theme_impl::ThemeFeatureServiceImpl;
use siscotek_delivery_impl::EmailJsDeliveryServiceImpl;
use siscotek_persistence_memory::MemoryThemeRepository;

// API
pub type RestServer = siscotek_api_rest::RestServer<ContactFeature, ThemeFeature>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Delivery>;
pub type ThemeFeature = ThemeFeatureServiceImpl<ThemeRepo>;

// Delivery
pub type Delivery = EmailJsDeliveryServiceImpl;

// Persistence
pub type ThemeRepo = MemoryThemeRepository;
