/*!
caminos-routing-unit
=====

This crate provides the routing unit of the routers of a network-on-chip, together with the minimal network construction needed to fill and exercise it.

# Usage

This crate is `caminos-routing-unit`. The binary `route_trace` loads a network configuration and prints the path followed by packets.

```ignore
route_trace -c network.cfg -s 0 -d 13 -v 0
route_trace -c network.cfg -a
```

As a library, build a [Network] from a configuration, or build [RoutingUnit]s directly and fill their tables with `add_route`, `add_weight`, `add_in_direction`, and `add_out_direction`. Then each packet is routed with [RoutingUnit::compute_route].

# Routing

The routing unit has a weighted routing table, the direction of each port, and a strategy selected by configuration:
* `Table` looks the weighted table. The candidates are the links of least weight among those reaching the destination.
* `XY` and `DOR3D` are dimension order routings in 2D and 3D meshes.
* `Ring` takes the shortest direction and moves packets into an escape virtual channel when crossing the dateline.
* `OddEven3D` and `PartiallyAdaptive3D` are adaptive in the XY plane, choosing by the free virtual channels of the outports.
* `Custom` and `Extension3D` are slots to be filled through [Plugs].

Packets for the current router always go by the table.

# Configuration Syntax

The configuration files are parsed using the `gramatica` crate. These files are parsed as a `ConfigurationValue` defined as following.

```ignore
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	True,
	False,
	None,
}
```

* An `Object` is typed `Name { key1 : value1, key2 : value2, [...] }`. Without attributes it may be written just `Name`.
* An `Array` is typed `[value1, value2, value3, [...]]`.
* A `Number` can be written like 2 or 3.1. Stored as a `f64`.
* A `Literal` is a double-quoted string.
* `True` is written `true` and `False` is written `false`.
* Comments are written as `//` until the end of line or between `/*` and `*/`.

## Network example

```ignore
Network
{
	topology: Mesh
	{
		rows: 4,
		columns: 4,
		depths: 2,
		//Weights of the links in each dimension. They give the preference of the table routing.
		x_weight: 1,
		y_weight: 2,
		z_weight: 3,
	},
	routing: OddEven3D,//or by its index, as `5`.
	vnets: 3,//traffic classes
	ordered_vnets: [0],//traffic classes that must follow a single path
	internal_vnets: [],//traffic classes allowed between routers. Empty means all.
	virtual_channels: 4,
	random_seed: 42,
}
```

*/

pub mod config_parser;
pub mod config;
pub mod error;
pub mod quantify;
pub mod matrix;
pub mod destination;
pub mod routing;
pub mod topology;

use std::collections::BTreeMap;
use std::fmt::Debug;

pub use config_parser::ConfigurationValue;
pub use error::{Error,ErrorKind};
pub use destination::DestinationSet;
pub use routing::{RoutingUnit,RoutingStrategy,StrategyBuilderArgument,RouteInfo,OutportSelection,RouterContext,PortDirection};
pub use topology::{Network,Hop,Topology,TopologyBuilderArgument};

///The builder functions given by the user, which take preference over the predefined ones with the same name.
#[derive(Default)]
pub struct Plugs
{
	routing_strategies: BTreeMap<String, fn(StrategyBuilderArgument) -> Box<dyn RoutingStrategy> >,
	topologies: BTreeMap<String, fn(TopologyBuilderArgument) -> Box<dyn Topology> >,
}

impl Plugs
{
	pub fn add_routing_strategy(&mut self, key:String, builder:fn(StrategyBuilderArgument) -> Box<dyn RoutingStrategy>)
	{
		self.routing_strategies.insert(key,builder);
	}
	pub fn add_topology(&mut self, key:String, builder:fn(TopologyBuilderArgument) -> Box<dyn Topology>)
	{
		self.topologies.insert(key,builder);
	}
}

impl Debug for Plugs
{
	fn fmt(&self,f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		write!(f,"{};",self.routing_strategies.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		write!(f,"{};",self.topologies.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		Ok(())
	}
}
