/// Test modules for overleash-dashboard
///
/// Tests are organized into logical groupings:
/// - controller: keyboard, pointer, rebuild and theme behaviour driven
///   against an in-memory page
mod controller;
