#![allow(dead_code)]
use caminos_routing_unit::*;
use config_parser::ConfigurationValue;


pub struct MeshBuilder
{
    pub rows: usize,
    pub columns: usize,
    pub depths: usize,
}

pub fn create_mesh_topology(args: MeshBuilder) -> ConfigurationValue
{
    ConfigurationValue::Object("Mesh".to_string(), vec![
        ("rows".to_string(), ConfigurationValue::Number(args.rows as f64)),
        ("columns".to_string(), ConfigurationValue::Number(args.columns as f64)),
        ("depths".to_string(), ConfigurationValue::Number(args.depths as f64)),
    ])
}

pub fn create_ring_topology(routers: usize) -> ConfigurationValue
{
    ConfigurationValue::Object("Ring".to_string(), vec![
        ("routers".to_string(), ConfigurationValue::Number(routers as f64)),
    ])
}

pub fn create_routing(name: &str) -> ConfigurationValue
{
    ConfigurationValue::Object(name.to_string(), vec![])
}

pub struct NetworkBuilder
{
    pub topology: ConfigurationValue,
    pub routing: ConfigurationValue,
    pub vnets: usize,
    pub ordered_vnets: Vec<usize>,
    pub virtual_channels: usize,
    pub random_seed: usize,
}

impl NetworkBuilder
{
    pub fn new(topology: ConfigurationValue, routing: ConfigurationValue) -> NetworkBuilder
    {
        NetworkBuilder{
            topology,
            routing,
            vnets: 1,
            ordered_vnets: vec![],
            virtual_channels: 2,
            random_seed: 42,
        }
    }
}

pub fn create_network_configuration(args: NetworkBuilder) -> ConfigurationValue
{
    ConfigurationValue::Object("Network".to_string(), vec![
        ("topology".to_string(), args.topology),
        ("routing".to_string(), args.routing),
        ("vnets".to_string(), ConfigurationValue::Number(args.vnets as f64)),
        ("ordered_vnets".to_string(), ConfigurationValue::Array(args.ordered_vnets.into_iter().map(|v| ConfigurationValue::Number(v as f64)).collect())),
        ("virtual_channels".to_string(), ConfigurationValue::Number(args.virtual_channels as f64)),
        ("random_seed".to_string(), ConfigurationValue::Number(args.random_seed as f64)),
    ])
}

pub fn create_network(args: NetworkBuilder, plugs: &Plugs) -> Network
{
    let cv = create_network_configuration(args);
    Network::new(&cv, plugs).expect("the network configuration should be valid")
}

/// The number of router to router hops in a mesh, ignoring weights.
pub fn manhattan_distance(extents: routing::TopologyExtents, source: usize, destination: usize) -> usize
{
    let [dx, dy, dz] = extents.cube_deltas(source, destination);
    (dx.abs() + dy.abs() + dz.abs()) as usize
}
